use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `GET /search/users`.
///
/// Items keep the order the API returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: u64,
    pub items: Vec<UserSummary>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// A single user item from the search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    #[serde(rename = "html_url")]
    pub profile_url: String,
    /// "User" or "Organization".
    #[serde(rename = "type")]
    pub account_type: String,
}

/// Profile returned by `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub login: String,
    pub avatar_url: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "public_repos")]
    pub public_repo_count: u64,
    #[serde(rename = "followers")]
    pub follower_count: u64,
    #[serde(rename = "following")]
    pub following_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "html_url")]
    pub profile_url: String,
}
