mod common;

use common::{make_app, octocat_details, render_app, search_result, StubDirectory};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ghsearch::api::{ApiError, Endpoint};
use ghsearch::ui::app::{App, Focus};
use ghsearch::ui::input::handle_key;
use ghsearch::ui::search::SearchPhase;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Type `text` one char every 100ms starting at `start`; returns the time of
/// the last keystroke.
fn type_text(app: &mut App, text: &str, start: Instant) -> Instant {
    let mut now = start;
    for (i, ch) in text.chars().enumerate() {
        now = start + ms(100 * i as u64);
        handle_key(app, press(KeyCode::Char(ch)), now);
        app.on_tick(now);
    }
    now
}

#[tokio::test]
async fn search_then_open_profile() {
    let stub = StubDirectory::new()
        .with_search("oct", Ok(search_result(&["octocat"])))
        .with_profile("octocat", Ok(octocat_details()));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    let last = type_text(&mut app, "oct", t0);
    assert_eq!(app.input().value(), "oct");
    app.on_tick(last + ms(499));
    assert!(stub.search_calls().is_empty());

    app.on_tick(last + ms(500));
    assert!(app.search().is_loading());

    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, last + ms(600));
    let screen = render_app(&app, 100, 30);
    assert!(screen.contains("(O) octocat"));
    assert!(screen.contains("User"));
    assert_eq!(app.search().users().len(), 1);

    handle_key(&mut app, press(KeyCode::Down), last + ms(700));
    assert_eq!(app.focus(), Focus::Results);
    handle_key(&mut app, press(KeyCode::Enter), last + ms(800));
    assert!(app.details().is_visible());
    assert!(render_app(&app, 100, 30).contains("░░░"));

    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, last + ms(900));
    let screen = render_app(&app, 100, 30);

    let stats = screen
        .lines()
        .find(|line| line.contains("15.0k"))
        .expect("stats row");
    assert!(stats.contains('8'));
    assert!(stats.contains('9'));
    assert!(screen.contains("Public Repos"));
    assert!(screen.contains("Followers"));
    assert!(screen.contains("Following"));
    assert!(screen.contains("Joined January 25, 2011"));
    assert!(screen.contains("Works at @github"));
    assert!(screen.contains("San Francisco"));
    assert!(screen.contains("https://github.com/octocat"));

    assert_eq!(stub.search_calls(), vec!["oct".to_string()]);
    assert_eq!(stub.details_calls(), vec!["octocat".to_string()]);
}

#[tokio::test]
async fn reopening_profile_is_served_from_cache() {
    let stub = StubDirectory::new()
        .with_search("oct", Ok(search_result(&["octocat"])))
        .with_profile("octocat", Ok(octocat_details()));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("oct", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);

    assert!(app.open_selected(t0));
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);
    let fetches = app.queries().fetch_count();

    handle_key(&mut app, press(KeyCode::Esc), t0 + ms(100));
    assert!(!app.details().is_visible());
    assert_eq!(app.details().selected_login(), Some("octocat"));

    assert!(app.open_selected(t0 + Duration::from_secs(10)));
    assert_eq!(app.details().details(), Some(&octocat_details()));
    assert_eq!(app.queries().fetch_count(), fetches);
    assert_eq!(stub.details_calls().len(), 1);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn short_term_never_requests() {
    let stub = StubDirectory::new();
    let (mut app, _rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    let last = type_text(&mut app, "oc", t0);
    app.on_tick(last + Duration::from_secs(2));

    assert_eq!(app.search().term, "oc");
    assert_eq!(app.search().phase, SearchPhase::Idle);
    assert_eq!(app.queries().fetch_count(), 0);
    assert!(stub.search_calls().is_empty());
    assert!(render_app(&app, 100, 30).contains("Start typing to search GitHub users."));
}

#[tokio::test]
async fn typing_burst_issues_one_request() {
    let stub = StubDirectory::new();
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    let last = type_text(&mut app, "octo", t0);
    app.on_tick(last + ms(500));
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, last + ms(600));

    assert_eq!(stub.search_calls(), vec!["octo".to_string()]);
    assert_eq!(app.queries().fetch_count(), 1);
}

#[tokio::test]
async fn backspace_below_threshold_returns_to_idle() {
    let stub = StubDirectory::new().with_search("oct", Ok(search_result(&["octocat"])));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("oct", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);
    assert!(app.search().has_results());

    handle_key(&mut app, press(KeyCode::Backspace), t0 + ms(100));
    app.on_tick(t0 + ms(600));

    assert_eq!(app.search().term, "oc");
    assert_eq!(app.search().phase, SearchPhase::Idle);
    assert_eq!(stub.search_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_answer_for_previous_term_is_not_shown() {
    let stub = StubDirectory::new()
        .with_search("oct", Ok(search_result(&["from-oct"])))
        .with_search("octo", Ok(search_result(&["from-octo"])))
        .with_delay("oct", ms(300))
        .with_delay("octo", ms(10));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("oct", t0);
    app.flush_input(t0);
    app.set_query("octo", t0 + ms(50));
    app.flush_input(t0 + ms(50));

    let first = rx.recv().await.unwrap();
    app.on_query_settled(first, t0 + ms(60));
    let second = rx.recv().await.unwrap();
    app.on_query_settled(second, t0 + ms(400));

    let logins: Vec<_> = app.search().users().iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, ["from-octo"]);
    assert_eq!(app.search().term, "octo");
}

#[tokio::test]
async fn rate_limit_message_is_distinct() {
    let stub = StubDirectory::new().with_search("oct", Err(ApiError::RateLimited));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("oct", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);

    let screen = render_app(&app, 100, 30);
    assert!(screen.contains("Rate limit exceeded. Please wait a minute."));
    assert!(!screen.contains("Failed to fetch users from GitHub."));
}

#[tokio::test]
async fn other_failures_show_generic_message() {
    let stub = StubDirectory::new().with_search(
        "oct",
        Err(ApiError::request_failed(Endpoint::Search, Some(502), "bad gateway")),
    );
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("oct", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);

    assert!(render_app(&app, 100, 30).contains("Failed to fetch users from GitHub."));
}

#[tokio::test]
async fn empty_result_names_the_term() {
    let stub = StubDirectory::new();
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("zzzzqqq", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);

    assert!(render_app(&app, 100, 30).contains("No users found for \"zzzzqqq\""));
}

#[tokio::test]
async fn failed_profile_shows_message() {
    let stub = StubDirectory::new().with_search("ghost", Ok(search_result(&["ghost"])));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("ghost", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);
    app.open_details("ghost", t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);

    assert!(render_app(&app, 100, 30).contains("Failed to load user details."));
}

#[tokio::test]
async fn closed_dialog_does_not_refresh_profile() {
    let stub = StubDirectory::new()
        .with_search("oct", Ok(search_result(&["octocat"])))
        .with_profile("octocat", Ok(octocat_details()));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("oct", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);
    app.open_selected(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);
    app.close_details(t0);

    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        t0 + ms(100),
    );
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0 + ms(200));

    assert_eq!(stub.search_calls().len(), 2);
    assert_eq!(stub.details_calls().len(), 1);
}

#[tokio::test]
async fn quit_keys_stop_the_app() {
    let (mut app, _rx) = make_app(StubDirectory::new());
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        Instant::now(),
    );
    assert!(app.should_quit());
}

#[tokio::test]
async fn failed_refresh_keeps_results_visible() {
    let stub = StubDirectory::new().with_search("oct", Ok(search_result(&["octocat"])));
    let (mut app, mut rx) = make_app(Arc::clone(&stub));
    let t0 = Instant::now();

    app.set_query("oct", t0);
    app.flush_input(t0);
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0);

    let _ = Arc::clone(&stub).fail_next(1);
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        t0 + ms(100),
    );
    let settled = rx.recv().await.unwrap();
    app.on_query_settled(settled, t0 + ms(200));

    let screen = render_app(&app, 100, 30);
    assert!(screen.contains("Failed to fetch users from GitHub. Showing previous results."));
    assert!(screen.contains("(O) octocat"));
    assert!(app.search().has_results());
    assert_eq!(stub.search_calls().len(), 2);
}
