use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self
    }

    /// Title bar; `fetching` appends an activity marker.
    pub fn widget(&self, fetching: bool) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD);
        let separator_style = Style::default().fg(GLOBAL_BORDER);
        let muted_style = Style::default().fg(MUTED_TEXT);
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled("GitHub User Search", text_style),
            Span::styled("  │  ", separator_style),
            Span::styled("Find users by login", muted_style),
        ];
        if fetching {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled("fetching…", Style::default().fg(ACCENT)));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
