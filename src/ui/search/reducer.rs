use crate::query::{QueryState, QueryStatus};
use crate::api::{ApiError, SearchResult};
use crate::ui::mvi::Reducer;
use crate::ui::search::intent::SearchIntent;
use crate::ui::search::state::{SearchPhase, SearchState};

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::TermSettled { term } => SearchState {
                term,
                phase: SearchPhase::Idle,
                selected: 0,
                refresh_error: None,
            },
            SearchIntent::QueryChanged { term, query } => {
                if term != state.term {
                    // Late answer for a term the user already moved past.
                    return state;
                }
                let (phase, refresh_error) = phase_for(query);
                let selected = clamp_selection(state.selected, &phase);
                SearchState {
                    term: state.term,
                    phase,
                    selected,
                    refresh_error,
                }
            }
            SearchIntent::MoveSelection { delta } => {
                let count = state.users().len();
                if count == 0 {
                    return state;
                }
                let selected = state
                    .selected
                    .saturating_add_signed(delta)
                    .min(count - 1);
                SearchState { selected, ..state }
            }
            SearchIntent::Select { index } => {
                if index >= state.users().len() {
                    return state;
                }
                SearchState {
                    selected: index,
                    ..state
                }
            }
        }
    }
}

/// A failed refetch of cached results keeps the results and reports the
/// error next to them.
fn phase_for(query: QueryState<SearchResult>) -> (SearchPhase, Option<ApiError>) {
    match (query.status, query.data) {
        (QueryStatus::Idle, _) => (SearchPhase::Idle, None),
        (QueryStatus::Loading, _) => (SearchPhase::Loading, None),
        (QueryStatus::Success, Some(result)) => (SearchPhase::Success(result), None),
        (QueryStatus::Success, None) => (SearchPhase::Loading, None),
        (QueryStatus::Error, Some(result)) => (SearchPhase::Success(result), query.error),
        (QueryStatus::Error, None) => match query.error {
            Some(error) => (SearchPhase::Error(error), None),
            None => (SearchPhase::Idle, None),
        },
    }
}

fn clamp_selection(selected: usize, phase: &SearchPhase) -> usize {
    match phase {
        SearchPhase::Success(result) if !result.items.is_empty() => {
            selected.min(result.items.len() - 1)
        }
        _ => 0,
    }
}
