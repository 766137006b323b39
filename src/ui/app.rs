use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{ApiError, UserDirectory};
use crate::config::{Config, MIN_TERM_CHARS};
use crate::debounce::Debouncer;
use crate::query::{QueryClient, QueryData, QueryKey, QueryOptions, QuerySettled};
use crate::ui::details::{DetailsDialogState, DetailsIntent, DetailsReducer};
use crate::ui::mvi::Reducer;
use crate::ui::search::{SearchIntent, SearchReducer, SearchState};
use crate::ui::text_input::TextInput;

type QueryFuture = Pin<Box<dyn Future<Output = Result<QueryData, ApiError>> + Send>>;

/// Which pane receives keys when the dialog is closed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Focus {
    #[default]
    Input,
    Results,
}

/// Behaviour knobs derived from the configuration file.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub debounce: Duration,
    /// Shortest term, in characters, that is sent to the API.
    pub min_term_chars: usize,
    pub search: QueryOptions,
    pub details: QueryOptions,
    pub gc_time: Duration,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        let backoff = config.cache.retry_backoff();
        Self {
            debounce: config.search.debounce(),
            min_term_chars: config.search.min_term_chars,
            search: QueryOptions::default()
                .stale_time(config.search.stale_time())
                .retry(config.search.retries)
                .retry_backoff(backoff),
            details: QueryOptions::default()
                .stale_time(config.details.stale_time())
                .retry(config.details.retries)
                .retry_backoff(backoff),
            gc_time: config.cache.gc_time(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    input: TextInput,
    debouncer: Debouncer,
    /// Search pipeline state (MVI pattern).
    search: SearchState,
    /// Profile dialog state (MVI pattern).
    details: DetailsDialogState,
    queries: QueryClient,
    directory: Arc<dyn UserDirectory>,
    settings: AppSettings,
}

impl App {
    pub fn new(
        queries: QueryClient,
        directory: Arc<dyn UserDirectory>,
        settings: AppSettings,
    ) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Input,
            input: TextInput::default(),
            debouncer: Debouncer::new(settings.debounce),
            search: SearchState::default(),
            details: DetailsDialogState::default(),
            queries,
            directory,
            settings,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = match focus {
            Focus::Results if !self.search.has_results() => Focus::Input,
            other => other,
        };
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn details(&self) -> &DetailsDialogState {
        &self.details
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// When the event loop must wake up to settle pending input.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Replace the input text, e.g. with a query given on the command line.
    pub fn set_query(&mut self, text: &str, now: Instant) {
        self.input.set(text);
        self.on_text_changed(now);
    }

    /// The input text was edited; restart the quiet period.
    pub fn on_text_changed(&mut self, now: Instant) {
        self.debouncer.update(self.input.value(), now);
    }

    /// Settle the input right away instead of waiting for the quiet period.
    pub fn flush_input(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.flush() {
            self.settle_term(term, now);
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.poll(now) {
            self.settle_term(term, now);
        }
        let active = self.active_keys();
        self.queries
            .collect_garbage(now, self.settings.gc_time, &active);
    }

    // ========================================================================
    // Search (MVI pattern)
    // ========================================================================

    fn dispatch_search(&mut self, intent: SearchIntent) {
        dispatch_mvi!(self, search, SearchReducer, intent);
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.dispatch_search(SearchIntent::MoveSelection { delta });
    }

    pub fn select(&mut self, index: usize) {
        self.dispatch_search(SearchIntent::Select { index });
    }

    fn search_enabled(&self, term: &str) -> bool {
        term.chars().count() >= self.settings.min_term_chars.max(MIN_TERM_CHARS)
    }

    /// A new debounced term: switch the view to its cache entry.
    pub fn settle_term(&mut self, term: String, now: Instant) {
        tracing::debug!(term = %term, "Search term settled");
        self.dispatch_search(SearchIntent::TermSettled { term: term.clone() });
        if self.focus == Focus::Results {
            self.focus = Focus::Input;
        }

        let options = self
            .settings
            .search
            .clone()
            .enabled(self.search_enabled(&term));
        let fetch = search_fetcher(&self.directory, &term);
        self.queries
            .subscribe(QueryKey::Search(term.clone()), &options, now, fetch);
        self.sync_search(&term);
    }

    /// Force a fresh request for the active term and the open profile.
    pub fn refresh(&mut self, now: Instant) {
        let term = self.search.term.clone();
        if self.search_enabled(&term) {
            let fetch = search_fetcher(&self.directory, &term);
            self.queries.refetch(
                QueryKey::Search(term.clone()),
                &self.settings.search,
                now,
                fetch,
            );
            self.sync_search(&term);
        }

        if let Some(login) = self.details.visible_login().map(str::to_string) {
            let fetch = details_fetcher(&self.directory, &login);
            self.queries.refetch(
                QueryKey::UserDetails(login.clone()),
                &self.settings.details,
                now,
                fetch,
            );
            self.sync_details(&login);
        }
    }

    fn sync_search(&mut self, term: &str) {
        let query = self
            .queries
            .state(&QueryKey::Search(term.to_string()))
            .map_data(QueryData::into_search);
        self.dispatch_search(SearchIntent::QueryChanged {
            term: term.to_string(),
            query,
        });
    }

    // ========================================================================
    // Details dialog (MVI pattern)
    // ========================================================================

    fn dispatch_details(&mut self, intent: DetailsIntent) {
        dispatch_mvi!(self, details, DetailsReducer, intent);
    }

    pub fn open_details(&mut self, login: &str, now: Instant) {
        tracing::debug!(login, "Opening profile");
        self.dispatch_details(DetailsIntent::Open {
            login: login.to_string(),
        });
        let fetch = details_fetcher(&self.directory, login);
        self.queries.subscribe(
            QueryKey::UserDetails(login.to_string()),
            &self.settings.details,
            now,
            fetch,
        );
        self.sync_details(login);
    }

    /// Open the dialog for the highlighted card.
    pub fn open_selected(&mut self, now: Instant) -> bool {
        let Some(login) = self.search.selected_user().map(|user| user.login.clone()) else {
            return false;
        };
        self.open_details(&login, now);
        true
    }

    /// Close the dialog. The profile stays cached but is no longer fetched.
    pub fn close_details(&mut self, now: Instant) {
        let Some(login) = self.details.visible_login().map(str::to_string) else {
            return;
        };
        self.dispatch_details(DetailsIntent::Close);
        let options = self.settings.details.clone().enabled(false);
        let fetch = details_fetcher(&self.directory, &login);
        self.queries
            .subscribe(QueryKey::UserDetails(login), &options, now, fetch);
    }

    fn sync_details(&mut self, login: &str) {
        let query = self
            .queries
            .state(&QueryKey::UserDetails(login.to_string()))
            .map_data(QueryData::into_user_details);
        self.dispatch_details(DetailsIntent::QueryChanged {
            login: login.to_string(),
            query,
        });
    }

    // ========================================================================
    // Query completions
    // ========================================================================

    /// Apply a finished fetch and refresh whichever view shows its key.
    pub fn on_query_settled(&mut self, settled: QuerySettled, now: Instant) {
        let key = settled.key.clone();
        if !self.queries.apply(settled, now) {
            return;
        }
        match key {
            QueryKey::Search(term) => self.sync_search(&term),
            QueryKey::UserDetails(login) => self.sync_details(&login),
        }
    }

    fn active_keys(&self) -> Vec<QueryKey> {
        let mut keys = vec![QueryKey::Search(self.search.term.clone())];
        if let Some(login) = self.details.selected_login() {
            keys.push(QueryKey::UserDetails(login.to_string()));
        }
        keys
    }
}

fn search_fetcher(
    directory: &Arc<dyn UserDirectory>,
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

fn details_fetcher(
    directory: &Arc<dyn UserDirectory>,
    login: &str,
) -> impl Fn() -> QueryFuture + Send + 'static {
    let directory = Arc::clone(directory);
    let login = login.to_string();
    move || -> QueryFuture {
        let directory = Arc::clone(&directory);
        let login = login.clone();
        Box::pin(async move {
            directory
                .user_details(&login)
                .await
                .map(QueryData::UserDetails)
        })
    }
}
