//! Keyed cache of asynchronous request results.
//!
//! # Lifecycle of an entry
//!
//! ```text
//!            subscribe            fetch ok
//!   Idle ───────────────→ Loading ─────────→ Success ──┐ stale + subscribe
//!                            │                  ↑      │ (background refetch)
//!                            │ fetch err        └──────┘
//!                            ↓
//!                          Error ── subscribe ──→ Loading
//! ```
//!
//! The cache is owned by the UI thread. Fetches run on a tokio runtime and
//! report back through a [`SettleNotifier`]; the UI loop hands each
//! [`QuerySettled`] to [`QueryClient::apply`], which drops completions whose
//! generation is no longer the latest for their key.

mod client;
mod key;
mod options;
mod state;

pub use client::{QueryClient, QuerySettled, SettleNotifier};
pub use key::{QueryData, QueryKey};
pub use options::{QueryOptions, RetryPolicy};
pub use state::{QueryState, QueryStatus};
