//! Profile dialog rendering.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::api::UserDetails;
use crate::ui::details::state::{DetailsDialogState, DetailsPhase};
use crate::ui::format::{avatar_initial, format_join_date, format_thousands};
use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, SKELETON, STATUS_ERROR,
};

const DIALOG_WIDTH: u16 = 60;

/// Rows used by the repos / followers / following strip.
const STATS_HEIGHT: u16 = 3;

/// Render the profile dialog over `area` when it is open.
pub fn render_details_dialog(frame: &mut Frame, area: Rect, state: &DetailsDialogState) {
    let DetailsDialogState::Visible { login, phase } = state else {
        return;
    };

    let content_width = DIALOG_WIDTH.min(area.width).saturating_sub(4);
    let top = top_lines(login, phase);
    let top_height = wrapped_height(&top, content_width);
    let stats_height = if phase.profile().is_some() {
        STATS_HEIGHT
    } else {
        0
    };
    let bottom = bottom_lines(phase);
    let bottom_height = bottom.len() as u16;

    let height = top_height + stats_height + bottom_height + 2;
    let rect = centered_rect_by_size(area, DIALOG_WIDTH, height);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(" Profile ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let inner = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };
    let [top_area, stats_area, bottom_area] = Layout::vertical([
        Constraint::Length(top_height),
        Constraint::Length(stats_height),
        Constraint::Length(bottom_height),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(top).wrap(Wrap { trim: true }), top_area);
    if let Some(details) = phase.profile() {
        render_stats(frame, stats_area, details);
    }
    frame.render_widget(Paragraph::new(bottom), bottom_area);
}

fn top_lines(login: &str, phase: &DetailsPhase) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("({}) ", avatar_initial(login)),
            Style::default().fg(MUTED_TEXT),
        ),
        Span::styled(
            login.to_string(),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        ),
    ])];

    match phase {
        DetailsPhase::Loading => {
            let skeleton = Style::default().fg(SKELETON);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("░".repeat(48), skeleton)));
            lines.push(Line::from(Span::styled("░".repeat(48), skeleton)));
            lines.push(Line::from(Span::styled("░".repeat(32), skeleton)));
        }
        DetailsPhase::Failed => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Failed to load user details.",
                Style::default().fg(STATUS_ERROR),
            )));
        }
        DetailsPhase::Loaded(details) | DetailsPhase::Stale(details) => {
            if let DetailsPhase::Stale(_) = phase {
                lines.push(Line::from(Span::styled(
                    "Refresh failed. Showing saved profile.",
                    Style::default().fg(STATUS_ERROR),
                )));
            }
            if let Some(location) = &details.location {
                lines.push(Line::from(Span::styled(
                    format!("    {}", location),
                    Style::default().fg(MUTED_TEXT),
                )));
            }
            if let Some(bio) = &details.bio {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    bio.clone(),
                    Style::default().fg(HEADER_TEXT).add_modifier(Modifier::ITALIC),
                )));
            }
            if let Some(company) = &details.company {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Works at ", Style::default().fg(HEADER_TEXT)),
                    Span::styled(
                        company.clone(),
                        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }
    }
    lines
}

fn bottom_lines(phase: &DetailsPhase) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(details) = phase.profile() {
        lines.push(Line::from(vec![
            Span::styled("Joined ", Style::default().fg(MUTED_TEXT)),
            Span::styled(
                format_join_date(&details.created_at),
                Style::default().fg(HEADER_TEXT),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            details.profile_url.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc: Close",
        Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM),
    )));
    lines
}

fn render_stats(frame: &mut Frame, area: Rect, details: &UserDetails) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats = [
        (details.public_repo_count.to_string(), "Public Repos"),
        (format_thousands(details.follower_count), "Followers"),
        (details.following_count.to_string(), "Following"),
    ];
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(inner);
    for ((value, label), column) in stats.into_iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(MUTED_TEXT))),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            *column,
        );
    }
}

/// Rows `lines` take when wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width) as u16)
        .sum()
}
