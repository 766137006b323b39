use crate::api::UserDetails;
use crate::query::{QueryState, QueryStatus};
use crate::ui::details::intent::DetailsIntent;
use crate::ui::details::state::{DetailsDialogState, DetailsPhase};
use crate::ui::mvi::Reducer;

pub struct DetailsReducer;

impl Reducer for DetailsReducer {
    type State = DetailsDialogState;
    type Intent = DetailsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DetailsIntent::Open { login } => DetailsDialogState::Visible {
                login,
                phase: DetailsPhase::Loading,
            },
            DetailsIntent::Close => match state {
                DetailsDialogState::Visible { login, .. } => DetailsDialogState::Hidden {
                    last_login: Some(login),
                },
                hidden => hidden,
            },
            DetailsIntent::QueryChanged { login, query } => match state {
                DetailsDialogState::Visible {
                    login: current, ..
                } if current == login => DetailsDialogState::Visible {
                    login: current,
                    phase: phase_for(query),
                },
                other => other,
            },
        }
    }
}

fn phase_for(query: QueryState<UserDetails>) -> DetailsPhase {
    match (query.status, query.data) {
        (QueryStatus::Error, Some(details)) => DetailsPhase::Stale(details),
        (QueryStatus::Error, None) => DetailsPhase::Failed,
        (_, Some(details)) => DetailsPhase::Loaded(details),
        (_, None) => DetailsPhase::Loading,
    }
}
