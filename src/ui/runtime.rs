use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::api::{GitHubClient, UserDirectory};
use crate::config::Config;
use crate::query::QueryClient;
use crate::ui::app::{App, AppSettings};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Upper bound on how long the loop sleeps without input.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the search UI until the user quits.
///
/// `initial_query` pre-fills the input and is searched right away.
pub fn run(config: &Config, initial_query: Option<String>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("ghsearch-http")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let client = GitHubClient::new(&config.api).context("Failed to build GitHub client")?;
    let directory: Arc<dyn UserDirectory> = Arc::new(client);

    let (mut terminal, guard) = setup_terminal().context("Failed to set up terminal")?;
    let events = EventHandler::new(TICK_RATE);
    let queries = QueryClient::new(runtime.handle().clone(), events.notifier());
    let mut app = App::new(queries, directory, AppSettings::from_config(config));

    if let Some(query) = initial_query {
        let now = Instant::now();
        app.set_query(&query, now);
        app.flush_input(now);
    }
    tracing::info!(base_url = %config.api.base_url, "Search UI started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        // Wake up exactly when pending input settles.
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(TICK_RATE)
            .min(TICK_RATE);

        match events.next(timeout) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key, Instant::now()),
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Tick) => {}
            Ok(AppEvent::QuerySettled(settled)) => app.on_query_settled(settled, Instant::now()),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        app.on_tick(Instant::now());
    }

    drop(events);
    drop(guard);
    runtime.shutdown_timeout(Duration::from_millis(100));
    tracing::info!(fetches = app.queries().fetch_count(), "Search UI stopped");
    Ok(())
}
