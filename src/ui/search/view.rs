use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::api::UserSummary;
use crate::ui::format::{avatar_initial, capitalize};
use crate::ui::search::state::{SearchPhase, SearchState, GRID_COLUMNS, PLACEHOLDER_CARDS};
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, SKELETON, STATUS_ERROR,
};

/// Rows per card including borders.
const CARD_HEIGHT: u16 = 4;

/// Render whatever the current search phase calls for into `area`.
///
/// `focused` highlights the selected card when the grid has focus.
pub fn render_search_body(frame: &mut Frame, area: Rect, state: &SearchState, focused: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    match &state.phase {
        SearchPhase::Idle => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Start typing to search GitHub users.",
                Style::default().fg(MUTED_TEXT),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(hint, padded(area));
        }
        SearchPhase::Loading => {
            for (index, rect) in placeholder_slots(area).into_iter().enumerate() {
                frame.render_widget(placeholder_card(index, rect.height), rect);
            }
        }
        SearchPhase::Error(error) => {
            let message = Paragraph::new(Line::from(Span::styled(
                error.to_string(),
                Style::default()
                    .fg(STATUS_ERROR)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(message, padded(area));
        }
        SearchPhase::Success(result) if result.is_empty() => {
            let message = Paragraph::new(Line::from(Span::styled(
                format!("No users found for \"{}\"", state.term),
                Style::default().fg(MUTED_TEXT),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(message, padded(area));
        }
        SearchPhase::Success(result) => {
            let grid = match &state.refresh_error {
                Some(error) => {
                    let [banner, rest] =
                        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
                    let notice = Paragraph::new(Line::from(Span::styled(
                        format!("{} Showing previous results.", error),
                        Style::default().fg(STATUS_ERROR),
                    )))
                    .alignment(Alignment::Center);
                    frame.render_widget(notice, banner);
                    rest
                }
                None => area,
            };
            if grid.height == 0 {
                return;
            }
            let first_row = first_visible_row(grid, state.selected);
            let first = first_row * GRID_COLUMNS;
            for (index, rect) in card_slots(grid, first, result.items.len()) {
                let highlighted = focused && index == state.selected;
                frame.render_widget(user_card(&result.items[index], highlighted), rect);
            }
        }
    }
}

fn padded(area: Rect) -> Rect {
    Rect {
        y: area.y.saturating_add(1).min(area.y + area.height),
        height: area.height.saturating_sub(1),
        ..area
    }
}

fn visible_rows(area: Rect) -> usize {
    (area.height / CARD_HEIGHT).max(1) as usize
}

/// Scroll so that the selected card's row is on screen.
fn first_visible_row(area: Rect, selected: usize) -> usize {
    let selected_row = selected / GRID_COLUMNS;
    selected_row.saturating_sub(visible_rows(area) - 1)
}

/// Grid positions for cards `first..count` that fit into `area`.
fn card_slots(area: Rect, first: usize, count: usize) -> Vec<(usize, Rect)> {
    let column_width = area.width / GRID_COLUMNS as u16;
    let rows = visible_rows(area);
    (first..count)
        .take(rows * GRID_COLUMNS)
        .filter_map(|index| {
            let offset = index - first;
            let row = (offset / GRID_COLUMNS) as u16;
            let column = (offset % GRID_COLUMNS) as u16;
            let y = area.y + row * CARD_HEIGHT;
            if y + CARD_HEIGHT > area.y + area.height {
                return None;
            }
            Some((
                index,
                Rect {
                    x: area.x + column * column_width,
                    y,
                    width: column_width,
                    height: CARD_HEIGHT,
                },
            ))
        })
        .collect()
}

/// Slots for every loading placeholder. Rows shrink to fit short bodies, and
/// a one-row body puts all placeholders side by side.
fn placeholder_slots(area: Rect) -> Vec<Rect> {
    let columns = if area.height >= 2 {
        GRID_COLUMNS
    } else {
        PLACEHOLDER_CARDS
    };
    let rows = PLACEHOLDER_CARDS.div_ceil(columns) as u16;
    let height = (area.height / rows).clamp(1, CARD_HEIGHT);
    let width = area.width / columns as u16;
    (0..PLACEHOLDER_CARDS)
        .map(|index| Rect {
            x: area.x + (index % columns) as u16 * width,
            y: area.y + (index / columns) as u16 * height,
            width,
            height,
        })
        .collect()
}

fn user_card(user: &UserSummary, highlighted: bool) -> Paragraph<'static> {
    let border = if highlighted { ACCENT } else { GLOBAL_BORDER };
    let login_style = if highlighted {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" ({}) ", avatar_initial(&user.login)),
                Style::default().fg(MUTED_TEXT),
            ),
            Span::styled(user.login.clone(), login_style),
        ]),
        Line::from(vec![
            Span::raw("     "),
            Span::styled(capitalize(&user.account_type), Style::default().fg(MUTED_TEXT)),
        ]),
    ];

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    )
}

fn placeholder_card(index: usize, height: u16) -> Paragraph<'static> {
    let skeleton = Style::default().fg(SKELETON);
    // Vary widths a little so the grid does not look like a table.
    let name_width = 10 + (index % 3) * 2;
    let name = Line::from(vec![
        Span::styled(" (·) ", skeleton),
        Span::styled("░".repeat(name_width), skeleton),
    ]);
    // Too short for borders plus content.
    if height < 3 {
        return Paragraph::new(name);
    }
    let lines = vec![
        name,
        Line::from(vec![Span::raw("     "), Span::styled("░".repeat(6), skeleton)]),
    ];

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}
