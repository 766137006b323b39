use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub details: DetailsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Connection settings for the GitHub REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the API (default: "https://api.github.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Personal access token. `GITHUB_TOKEN` takes precedence when set.
    #[serde(default)]
    pub token: Option<String>,
    /// Sent as `User-Agent`; GitHub rejects requests without one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Search pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed term is searched (default: 500).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Shortest term that triggers a request (default: 3).
    #[serde(default = "default_min_term_chars")]
    pub min_term_chars: usize,
    /// Freshness window of cached search results (default: 300).
    #[serde(default = "default_stale_time")]
    pub stale_time_seconds: u64,
    /// Automatic retries after a failed search (default: 0).
    #[serde(default)]
    pub retries: u32,
}

/// Details dialog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsConfig {
    /// Freshness window of cached profiles (default: 300).
    #[serde(default = "default_stale_time")]
    pub stale_time_seconds: u64,
    /// Automatic retries after a failed profile fetch (default: 0).
    #[serde(default)]
    pub retries: u32,
}

/// Query cache housekeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Unused entries are dropped after this many seconds (default: 300).
    #[serde(default = "default_gc_time")]
    pub gc_time_seconds: u64,
    /// Base backoff in milliseconds between retries (default: 1000).
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("ghsearch/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_debounce_ms() -> u64 {
    500
}

/// Terms shorter than this are never sent to the search API.
pub const MIN_TERM_CHARS: usize = 3;

fn default_min_term_chars() -> usize {
    MIN_TERM_CHARS
}

fn default_stale_time() -> u64 {
    300
}

fn default_gc_time() -> u64 {
    300
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_term_chars: default_min_term_chars(),
            stale_time_seconds: default_stale_time(),
            retries: 0,
        }
    }
}

impl Default for DetailsConfig {
    fn default() -> Self {
        Self {
            stale_time_seconds: default_stale_time(),
            retries: 0,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            gc_time_seconds: default_gc_time(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_seconds)
    }
}

impl DetailsConfig {
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_seconds)
    }
}

impl CacheConfig {
    pub fn gc_time(&self) -> Duration {
        Duration::from_secs(self.gc_time_seconds)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
