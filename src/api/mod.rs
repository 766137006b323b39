//! GitHub REST API access.
//!
//! The [`UserDirectory`] trait is the seam between the UI and the network:
//! [`GitHubClient`] talks to the real API, tests plug in stubs.

mod client;
mod error;
mod types;

pub use client::{GitHubClient, UserDirectory};
pub use error::{ApiError, Endpoint};
pub use types::{SearchResult, UserDetails, UserSummary};
