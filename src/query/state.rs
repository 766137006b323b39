use crate::api::ApiError;

/// Status of a cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    /// Never fetched (or disabled before the first fetch).
    #[default]
    Idle,
    /// First fetch in flight, nothing cached yet.
    Loading,
    Success,
    Error,
}

/// Owned snapshot of a cache entry, handed to the view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    /// A fetch is in flight, including background refetches of cached data.
    pub is_fetching: bool,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// Convert the payload, e.g. from the shared cache type to a typed view.
    pub fn map_data<U>(self, f: impl FnOnce(T) -> Option<U>) -> QueryState<U> {
        QueryState {
            status: self.status,
            data: self.data.and_then(f),
            error: self.error,
            is_fetching: self.is_fetching,
        }
    }
}
