use crate::api::{ApiError, SearchResult, UserSummary};
use crate::ui::mvi::UiState;

/// Cards per row in the results grid.
pub const GRID_COLUMNS: usize = 2;

/// Placeholder cards shown while the first page loads.
pub const PLACEHOLDER_CARDS: usize = 4;

/// Where the search pipeline is for the active term.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchPhase {
    /// Term too short; nothing requested.
    #[default]
    Idle,
    Loading,
    /// Results available, possibly empty.
    Success(SearchResult),
    Error(ApiError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// The debounced term the phase belongs to.
    pub term: String,
    pub phase: SearchPhase,
    /// Index of the highlighted card.
    pub selected: usize,
    /// A background refresh failed; `phase` still holds the cached results.
    pub refresh_error: Option<ApiError>,
}

impl UiState for SearchState {}

impl SearchState {
    pub fn users(&self) -> &[UserSummary] {
        match &self.phase {
            SearchPhase::Success(result) => &result.items,
            _ => &[],
        }
    }

    pub fn selected_user(&self) -> Option<&UserSummary> {
        self.users().get(self.selected)
    }

    pub fn has_results(&self) -> bool {
        !self.users().is_empty()
    }

    /// Successful search that matched nobody.
    pub fn is_empty_result(&self) -> bool {
        matches!(&self.phase, SearchPhase::Success(result) if result.is_empty())
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.phase {
            SearchPhase::Error(error) => Some(error),
            _ => None,
        }
    }
}
