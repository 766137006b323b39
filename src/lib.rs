//! Terminal client for searching GitHub users.
//!
//! Keystrokes are debounced ([`debounce`]), turned into cached API queries
//! ([`query`], [`api`]) and rendered as a card grid plus a profile dialog
//! ([`ui`]).

pub mod api;
pub mod config;
pub mod debounce;
pub mod logging;
pub mod query;
pub mod ui;
