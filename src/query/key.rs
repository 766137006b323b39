use std::fmt;

use crate::api::{SearchResult, UserDetails};

/// Identity of a cached query: the variant is the query kind, the payload
/// its parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `GET /search/users?q=<term>`
    Search(String),
    /// `GET /users/<login>`
    UserDetails(String),
}

impl QueryKey {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryKey::Search(_) => "github-search",
            QueryKey::UserDetails(_) => "user-details",
        }
    }

    pub fn param(&self) -> &str {
        match self {
            QueryKey::Search(term) => term,
            QueryKey::UserDetails(login) => login,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {:?}]", self.kind(), self.param())
    }
}

/// Payload stored for a successful query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryData {
    Search(SearchResult),
    UserDetails(UserDetails),
}

impl QueryData {
    pub fn into_search(self) -> Option<SearchResult> {
        match self {
            QueryData::Search(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_user_details(self) -> Option<UserDetails> {
        match self {
            QueryData::UserDetails(details) => Some(details),
            _ => None,
        }
    }
}
