use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

use super::error::{ApiError, Endpoint};
use super::types::{SearchResult, UserDetails};

/// Source of user search results and profiles.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Search users whose login or name matches `term`.
    async fn search_users(&self, term: &str) -> Result<SearchResult, ApiError>;

    /// Fetch the full profile of `login`.
    async fn user_details(&self, login: &str) -> Result<UserDetails, ApiError>;
}

/// HTTP client for the GitHub REST API.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid API base URL '{}'", config.base_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("Invalid token value")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint_url(&self, endpoint: Endpoint, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::request_failed(
                    endpoint,
                    None,
                    format!("Base URL '{}' cannot have a path", self.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, endpoint: Endpoint) -> Result<T, ApiError> {
        tracing::debug!(%url, ?endpoint, "GitHub request");

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(?endpoint, error = %e, "GitHub request failed");
            ApiError::request_failed(endpoint, None, e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN && endpoint == Endpoint::Search {
            tracing::warn!("GitHub search rate limit hit");
            return Err(ApiError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(?endpoint, status = status.as_u16(), "GitHub returned an error status");
            return Err(ApiError::request_failed(endpoint, Some(status.as_u16()), body));
        }

        response.json::<T>().await.map_err(|e| {
            ApiError::request_failed(
                endpoint,
                Some(status.as_u16()),
                format!("Failed to deserialize response: {}", e),
            )
        })
    }
}

#[async_trait]
impl UserDirectory for GitHubClient {
    async fn search_users(&self, term: &str) -> Result<SearchResult, ApiError> {
        let mut url = self.endpoint_url(Endpoint::Search, &["search", "users"])?;
        url.query_pairs_mut().append_pair("q", term);
        self.get_json(url, Endpoint::Search).await
    }

    async fn user_details(&self, login: &str) -> Result<UserDetails, ApiError> {
        let url = self.endpoint_url(Endpoint::UserDetails, &["users", login])?;
        self.get_json(url, Endpoint::UserDetails).await
    }
}
