use crate::ui::app::Focus;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const INPUT_HINTS: &str = " Enter: Search now │ ↓/Tab: Results │ Ctrl+R: Refresh │ Ctrl+Q: Quit";
pub const RESULTS_HINTS: &str = " ←↑↓→: Move │ Enter: Details │ Esc: Back to search │ Ctrl+Q: Quit";
pub const DIALOG_HINTS: &str = " Esc: Close │ Ctrl+R: Refresh │ Ctrl+Q: Quit";

/// Key hint bar; the hints follow whichever pane receives keys.
pub struct Footer {
    hints: &'static str,
}

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self { hints: INPUT_HINTS }
    }

    /// Hints for the pane that has the keyboard. An open dialog wins.
    pub fn for_view(focus: Focus, dialog_open: bool) -> Self {
        let hints = match (dialog_open, focus) {
            (true, _) => DIALOG_HINTS,
            (false, Focus::Input) => INPUT_HINTS,
            (false, Focus::Results) => RESULTS_HINTS,
        };
        Self { hints }
    }

    pub fn hints(&self) -> &'static str {
        self.hints
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let content_width = area.width.saturating_sub(2) as usize; // minus borders
        let hints_width = self.hints.chars().count();
        // Hints take priority over the version on narrow terminals.
        let version = format!("v{} ", VERSION);
        let version = if hints_width + version.chars().count() <= content_width {
            version
        } else {
            String::new()
        };
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version.chars().count());

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(self.hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
