//! Error types for GitHub API requests.

use thiserror::Error;

/// Which endpoint a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    UserDetails,
}

/// Errors that can occur while talking to the GitHub API.
///
/// Errors are cloned into the query cache and rendered verbatim, so they
/// carry plain data instead of the underlying transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The search endpoint answered 403.
    #[error("Rate limit exceeded. Please wait a minute.")]
    RateLimited,

    /// Any other non-success status, transport or decode failure.
    #[error("{}", .endpoint.failure_message())]
    RequestFailed {
        endpoint: Endpoint,
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        /// Technical details for diagnostics.
        detail: String,
    },
}

impl Endpoint {
    /// User-facing text for a failed request to this endpoint.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::Search => "Failed to fetch users from GitHub.",
            Endpoint::UserDetails => "Failed to fetch user details.",
        }
    }
}

impl ApiError {
    pub fn request_failed(endpoint: Endpoint, status: Option<u16>, detail: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            endpoint,
            status,
            detail: detail.into(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited)
    }

    /// Technical details for diagnostics.
    pub fn details(&self) -> String {
        match self {
            ApiError::RateLimited => "HTTP 403 from search endpoint".to_string(),
            ApiError::RequestFailed {
                status: Some(status),
                detail,
                ..
            } => format!("HTTP {}: {}", status, detail),
            ApiError::RequestFailed {
                status: None,
                detail,
                ..
            } => detail.clone(),
        }
    }
}
