pub mod auth_view;
pub mod board_view;
pub mod contacts_view;
pub mod detail_overlay;
pub mod help_overlay;
mod helpers;
pub mod status_row;
pub mod summary_view;
pub mod tab_bar;
pub mod task_form_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, View};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    if matches!(app.view, View::Login | View::Signup) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        auth_view::render_auth_view(frame, app, chunks[0]);
        status_row::render_status_row(frame, app, chunks[1]);
        return;
    }

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Summary => summary_view::render_summary_view(frame, app, chunks[1]),
        View::Board => board_view::render_board_view(frame, app, chunks[1]),
        View::AddTask => task_form_view::render_add_task_view(frame, app, chunks[1]),
        View::Contacts => contacts_view::render_contacts_view(frame, app, chunks[1]),
        View::Login | View::Signup => {}
    }

    // Overlays, topmost last
    if app.detail.is_some() {
        detail_overlay::render_detail_overlay(frame, app, chunks[1]);
    }
    if app.edit_form.is_some() {
        task_form_view::render_edit_overlay(frame, app, chunks[1]);
    }
    if app.contact_form.is_some() {
        contacts_view::render_contact_form(frame, app, chunks[1]);
    }
    if app.pending_delete.is_some() {
        detail_overlay::render_confirm_popup(frame, app, chunks[1]);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
