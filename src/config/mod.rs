mod loader;
mod types;

pub use loader::{ConfigError, TOKEN_ENV_VAR};
pub use types::{ApiConfig, CacheConfig, Config, DetailsConfig, SearchConfig, MIN_TERM_CHARS};
