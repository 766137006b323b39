use crate::ui::app::{App, Focus};
use crate::ui::details::render_details_dialog;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::search::render_search_body;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT};
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const INPUT_PLACEHOLDER: &str = "Search GitHub users...";

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let regions = layout_regions(area);
    let dialog_open = app.details().is_visible();

    let fetching = app.search().is_loading()
        || app.details().is_loading();
    frame.render_widget(Header::new().widget(fetching), regions.header);

    draw_input(frame, regions.input, app, !dialog_open);

    frame.render_widget(Clear, regions.body);
    render_search_body(
        frame,
        regions.body,
        app.search(),
        !dialog_open && app.focus() == Focus::Results,
    );

    let footer = Footer::for_view(app.focus(), dialog_open);
    frame.render_widget(footer.widget(regions.footer), regions.footer);

    render_details_dialog(frame, area, app.details());
}

fn draw_input(frame: &mut Frame<'_>, area: Rect, app: &App, interactive: bool) {
    if area.height == 0 {
        return;
    }
    let focused = interactive && app.focus() == Focus::Input;
    let border = if focused { ACCENT } else { GLOBAL_BORDER };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    let input = app.input();
    let line = if input.is_empty() {
        Line::from(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(MUTED_TEXT)))
    } else {
        Line::from(Span::styled(
            input.value().to_string(),
            Style::default().fg(HEADER_TEXT),
        ))
    };
    // Keep the cursor visible when the text is wider than the box.
    let scroll = (input.cursor() as u16).saturating_sub(inner.width.saturating_sub(1));
    frame.render_widget(Paragraph::new(line).block(block).scroll((0, scroll)), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (input.cursor() as u16).saturating_sub(scroll);
        frame.set_cursor_position(Position::new(x.min(inner.right() - 1), inner.y));
    }
}
