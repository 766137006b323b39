use crate::api::UserDetails;
use crate::query::QueryState;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum DetailsIntent {
    /// A card was activated.
    Open { login: String },
    Close,
    /// The cache state of `login`'s profile changed. Ignored unless the
    /// dialog is open for that login.
    QueryChanged {
        login: String,
        query: QueryState<UserDetails>,
    },
}

impl Intent for DetailsIntent {}
