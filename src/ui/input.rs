use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::{App, Focus};
use crate::ui::search::GRID_COLUMNS;

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 'r') {
        app.refresh(now);
        return;
    }

    if app.details().is_visible() {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
        ) {
            app.close_details(now);
        }
        return;
    }

    match app.focus() {
        Focus::Input => handle_input_key(app, key, now),
        Focus::Results => handle_results_key(app, key, now),
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent, now: Instant) {
    let input = app.input_mut();
    let changed = match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert(ch);
            true
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_home();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        KeyCode::Esc => {
            let had_text = !input.is_empty();
            input.clear();
            had_text
        }
        KeyCode::Enter => {
            app.flush_input(now);
            return;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.set_focus(Focus::Results);
            return;
        }
        _ => false,
    };
    if changed {
        app.on_text_changed(now);
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent, now: Instant) {
    let row = GRID_COLUMNS as isize;
    match key.code {
        KeyCode::Left => app.move_selection(-1),
        KeyCode::Right => app.move_selection(1),
        KeyCode::Up => {
            if app.search().selected < GRID_COLUMNS {
                app.set_focus(Focus::Input);
            } else {
                app.move_selection(-row);
            }
        }
        KeyCode::Down => app.move_selection(row),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.open_selected(now);
        }
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => app.set_focus(Focus::Input),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
