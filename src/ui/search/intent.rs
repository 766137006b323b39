use crate::api::SearchResult;
use crate::query::QueryState;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SearchIntent {
    /// The debounced term changed. Resets the phase to `Idle` until the
    /// cache reports on the new key.
    TermSettled { term: String },
    /// The cache state of the search for `term` changed. Ignored when
    /// `term` is no longer the active term.
    QueryChanged {
        term: String,
        query: QueryState<SearchResult>,
    },
    /// Move the highlighted card by `delta` positions.
    MoveSelection { delta: isize },
    Select { index: usize },
}

impl Intent for SearchIntent {}
