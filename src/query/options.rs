use std::time::Duration;

/// How many times a failed fetch is repeated before the error is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    #[default]
    Never,
    Limited(u32),
}

/// Retry count used when retries are switched on without a count.
const DEFAULT_RETRIES: u32 = 3;

impl From<bool> for RetryPolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            RetryPolicy::Limited(DEFAULT_RETRIES)
        } else {
            RetryPolicy::Never
        }
    }
}

impl From<u32> for RetryPolicy {
    fn from(count: u32) -> Self {
        if count == 0 {
            RetryPolicy::Never
        } else {
            RetryPolicy::Limited(count)
        }
    }
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `failures` failed attempts.
    pub fn allows(&self, failures: u32) -> bool {
        match self {
            RetryPolicy::Never => false,
            RetryPolicy::Limited(max) => failures <= *max,
        }
    }
}

/// Per-subscription options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// When false the query never fetches; cached data stays available.
    pub enabled: bool,
    /// Age after which a successful result is refetched on the next
    /// subscription. Zero means always revalidate.
    pub stale_time: Duration,
    pub retry: RetryPolicy,
    /// Delay before the first retry; doubles on every further attempt.
    pub retry_backoff: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_time: Duration::ZERO,
            retry: RetryPolicy::Never,
            retry_backoff: Duration::from_secs(1),
        }
    }
}

impl QueryOptions {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn retry(mut self, retry: impl Into<RetryPolicy>) -> Self {
        self.retry = retry.into();
        self
    }

    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Backoff before retry number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}
