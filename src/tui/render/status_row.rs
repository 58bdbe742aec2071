use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, hint) = match app.mode {
        Mode::Search => (
            vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
            ],
            "Enter keep  Esc clear",
        ),
        Mode::Move => {
            let target = app
                .move_state
                .as_ref()
                .map_or("", |m| m.target.label());
            (
                vec![
                    Span::styled(
                        " MOVE ",
                        Style::default()
                            .fg(app.theme.background)
                            .bg(app.theme.highlight)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" to {target}"),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                ],
                "h/l column  Enter drop  Esc cancel",
            )
        }
        Mode::Navigate => (notice_spans(app), key_hints(app)),
    };

    if app.show_key_hints || app.mode != Mode::Navigate {
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn notice_spans(app: &App) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    match &app.notice {
        Some(notice) => {
            let fg = if notice.is_error {
                app.theme.red
            } else {
                app.theme.green
            };
            vec![Span::styled(
                format!(" {}", notice.text),
                Style::default().fg(fg).bg(bg),
            )]
        }
        None => Vec::new(),
    }
}

/// Short key reminder for the current context
fn key_hints(app: &App) -> &'static str {
    if app.pending_delete.is_some() {
        return "y confirm  n cancel";
    }
    if app.edit_form.is_some() {
        return "Tab field  Ctrl-S save  Esc close";
    }
    if app.contact_form.is_some() {
        return "Tab field  Enter next/save  Esc close";
    }
    if app.detail.is_some() {
        return "Space toggle  e edit  d delete  m move  Esc close";
    }
    match app.view {
        View::Login => "Enter log in  Ctrl-G guest  Ctrl-N sign up",
        View::Signup => "Space accept  Enter sign up  Esc back",
        View::Summary => "Enter board  a add  ? help",
        View::Board => "hjkl move  Enter open  / search  m move  a add  ? help",
        View::AddTask => "Tab field  Ctrl-S create  Ctrl-L clear",
        View::Contacts => "n new  e edit  d delete  ? help",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn error_notice_is_shown() {
        let mut app = signed_in_app(sample_root());
        app.notice = Some(crate::tui::app::Notice {
            text: "Saving the move failed: store returned 503".into(),
            is_error: true,
        });
        let out = render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(out.contains("Saving the move failed"));
    }

    #[test]
    fn search_prompt_shows_query() {
        let mut app = signed_in_app(sample_root());
        app.switch_view(View::Board);
        app.mode = Mode::Search;
        app.search_input = "log".into();
        let out = render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(out.starts_with("/log"));
    }

    #[test]
    fn hints_can_be_turned_off() {
        let mut app = signed_in_app(sample_root());
        app.show_key_hints = false;
        let out = render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, &app, area));
        assert!(out.is_empty());
    }
}
