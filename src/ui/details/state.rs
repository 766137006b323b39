use crate::api::UserDetails;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsPhase {
    Loading,
    Loaded(UserDetails),
    /// Cached profile whose refresh failed.
    Stale(UserDetails),
    Failed,
}

impl DetailsPhase {
    /// Profile to display, fresh or cached.
    pub fn profile(&self) -> Option<&UserDetails> {
        match self {
            Self::Loaded(details) | Self::Stale(details) => Some(details),
            Self::Loading | Self::Failed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsDialogState {
    /// Dialog closed. Remembers the last login so reopening it is served
    /// from the cache.
    Hidden { last_login: Option<String> },
    Visible { login: String, phase: DetailsPhase },
}

impl Default for DetailsDialogState {
    fn default() -> Self {
        Self::Hidden { last_login: None }
    }
}

impl UiState for DetailsDialogState {}

impl DetailsDialogState {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// Dialog open and waiting for the first profile answer.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::Visible {
                phase: DetailsPhase::Loading,
                ..
            }
        )
    }

    /// Login the dialog shows, or showed last.
    pub fn selected_login(&self) -> Option<&str> {
        match self {
            Self::Hidden { last_login } => last_login.as_deref(),
            Self::Visible { login, .. } => Some(login),
        }
    }

    /// Login of the open dialog.
    pub fn visible_login(&self) -> Option<&str> {
        match self {
            Self::Visible { login, .. } => Some(login),
            Self::Hidden { .. } => None,
        }
    }

    pub fn details(&self) -> Option<&UserDetails> {
        match self {
            Self::Visible { phase, .. } => phase.profile(),
            Self::Hidden { .. } => None,
        }
    }
}
