//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ghsearch::api::{ApiError, Endpoint, SearchResult, UserDetails, UserDirectory, UserSummary};
use ghsearch::query::{QueryClient, QueryData, QuerySettled, SettleNotifier};
use ghsearch::ui::app::{App, AppSettings};
use parking_lot::Mutex;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

// -- Sample data ----------------------------------------------------------------

pub fn user(id: u64, login: &str) -> UserSummary {
    UserSummary {
        id,
        login: login.to_string(),
        avatar_url: format!("https://avatars.githubusercontent.com/u/{}", id),
        profile_url: format!("https://github.com/{}", login),
        account_type: "User".to_string(),
    }
}

pub fn search_result(logins: &[&str]) -> SearchResult {
    SearchResult {
        total_count: logins.len() as u64,
        items: logins
            .iter()
            .enumerate()
            .map(|(i, login)| user(i as u64 + 1, login))
            .collect(),
    }
}

/// The octocat profile as GitHub returns it.
pub fn octocat_details() -> UserDetails {
    UserDetails {
        login: "octocat".to_string(),
        avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
        location: Some("San Francisco".to_string()),
        bio: None,
        company: Some("@github".to_string()),
        public_repo_count: 8,
        follower_count: 15000,
        following_count: 9,
        created_at: Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).unwrap(),
        profile_url: "https://github.com/octocat".to_string(),
    }
}

// -- Stub directory -------------------------------------------------------------

/// `UserDirectory` serving canned answers and counting calls.
#[derive(Default)]
pub struct StubDirectory {
    searches: Mutex<HashMap<String, Result<SearchResult, ApiError>>>,
    profiles: Mutex<HashMap<String, Result<UserDetails, ApiError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    search_calls: Mutex<Vec<String>>,
    details_calls: Mutex<Vec<String>>,
    /// Number of upcoming calls that fail before the canned answer is used.
    failures_left: Mutex<u32>,
}

impl StubDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_search(self: Arc<Self>, term: &str, result: Result<SearchResult, ApiError>) -> Arc<Self> {
        self.searches.lock().insert(term.to_string(), result);
        self
    }

    pub fn with_profile(self: Arc<Self>, login: &str, result: Result<UserDetails, ApiError>) -> Arc<Self> {
        self.profiles.lock().insert(login.to_string(), result);
        self
    }

    /// Answers for `param` (term or login) take `delay` to arrive.
    pub fn with_delay(self: Arc<Self>, param: &str, delay: Duration) -> Arc<Self> {
        self.delays.lock().insert(param.to_string(), delay);
        self
    }

    pub fn fail_next(self: Arc<Self>, count: u32) -> Arc<Self> {
        *self.failures_left.lock() = count;
        self
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }

    pub fn details_calls(&self) -> Vec<String> {
        self.details_calls.lock().clone()
    }

    async fn pause(&self, param: &str) {
        let delay = self.delays.lock().get(param).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn take_failure(&self, endpoint: Endpoint) -> Option<ApiError> {
        let mut left = self.failures_left.lock();
        if *left == 0 {
            return None;
        }
        *left -= 1;
        Some(ApiError::request_failed(endpoint, Some(500), "stubbed failure"))
    }
}

#[async_trait]
impl UserDirectory for StubDirectory {
    async fn search_users(&self, term: &str) -> Result<SearchResult, ApiError> {
        self.search_calls.lock().push(term.to_string());
        self.pause(term).await;
        if let Some(err) = self.take_failure(Endpoint::Search) {
            return Err(err);
        }
        self.searches
            .lock()
            .get(term)
            .cloned()
            .unwrap_or_else(|| Ok(SearchResult::default()))
    }

    async fn user_details(&self, login: &str) -> Result<UserDetails, ApiError> {
        self.details_calls.lock().push(login.to_string());
        self.pause(login).await;
        if let Some(err) = self.take_failure(Endpoint::UserDetails) {
            return Err(err);
        }
        self.profiles.lock().get(login).cloned().unwrap_or_else(|| {
            Err(ApiError::request_failed(
                Endpoint::UserDetails,
                Some(404),
                "Not Found",
            ))
        })
    }
}

// -- Query cache helpers --------------------------------------------------------

/// Notifier that forwards completions into a channel the test can await.
pub fn settle_channel() -> (SettleNotifier, UnboundedReceiver<QuerySettled>) {
    let (tx, rx) = unbounded_channel();
    let notifier: SettleNotifier = Arc::new(move |settled: QuerySettled| {
        let _ = tx.send(settled);
    });
    (notifier, rx)
}

/// Query client spawning onto the current test runtime.
pub fn make_client() -> (QueryClient, UnboundedReceiver<QuerySettled>) {
    let (notifier, rx) = settle_channel();
    (
        QueryClient::new(tokio::runtime::Handle::current(), notifier),
        rx,
    )
}

pub type QueryFuture = Pin<Box<dyn Future<Output = Result<QueryData, ApiError>> + Send>>;

/// Fetch function searching `term` through `directory`.
pub fn fetch_search(
    directory: &Arc<StubDirectory>,
    term: &str,
) -> impl Fn() -> QueryFuture + Send + 'static {
    let directory = Arc::clone(directory);
    let term = term.to_string();
    move || -> QueryFuture {
        let directory = Arc::clone(&directory);
        let term = term.clone();
        Box::pin(async move { directory.search_users(&term).await.map(QueryData::Search) })
    }
}

/// Fetch function resolving after `delay` with `result`.
pub fn fetch_after(
    delay: Duration,
    result: Result<QueryData, ApiError>,
) -> impl Fn() -> QueryFuture + Send + 'static {
    move || -> QueryFuture {
        let result = result.clone();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            result
        })
    }
}

// -- App helpers ----------------------------------------------------------------

pub fn make_app(directory: Arc<StubDirectory>) -> (App, UnboundedReceiver<QuerySettled>) {
    let (queries, rx) = make_client();
    let app = App::new(queries, directory, AppSettings::default());
    (app, rx)
}

/// Render `app` into a test terminal and return the screen as text.
pub fn render_app(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| ghsearch::ui::render::draw(frame, app))
        .unwrap();
    buffer_text(&terminal)
}

pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

// -- Config helpers -------------------------------------------------------------

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
