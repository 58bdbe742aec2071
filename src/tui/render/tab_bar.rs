use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

use super::helpers::spans_width;

/// Render the tab bar: view tabs + session badge, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        "\u{25A6}",
        Style::default().fg(app.theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    for (i, view) in View::TABS.iter().enumerate() {
        let style = tab_style(app, app.view == *view);
        spans.push(Span::styled(format!(" {} {} ", i + 1, view.title()), style));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // Session badge on the right
    if let Some(session) = &app.session {
        let badge = format!("[{}] ", session.badge());
        let used = spans_width(&spans);
        let width = area.width as usize;
        let badge_w = badge.chars().count();
        if used + badge_w < width {
            spans.push(Span::styled(
                " ".repeat(width - used - badge_w),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(
                badge,
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

/// Plain separator with `┴` under each tab divider, plus the live filter on the board
fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    let indicator = if app.view == View::Board && !app.filter.is_empty() {
        Some(format!("filter: {}", app.filter.needle()))
    } else {
        None
    };
    let indicator_w = indicator.as_ref().map_or(0, |s| s.chars().count() + 2);
    let separator_end = width.saturating_sub(indicator_w);

    let sep_text: String = (0..separator_end)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let mut spans = vec![Span::styled(sep_text, Style::default().fg(dim).bg(bg))];
    if let Some(text) = indicator {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.push(Span::styled(
            text,
            Style::default().fg(app.theme.search_match_bg).bg(bg),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::{Session, User};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn tabs_are_numbered_in_order() {
        let app = signed_in_app(sample_root());
        let out = render_to_string(TERM_W, 2, |frame, area| render_tab_bar(frame, &app, area));
        let first = out.lines().next().unwrap();
        let s = first.find("1 Summary").unwrap();
        let b = first.find("2 Board").unwrap();
        let a = first.find("3 Add task").unwrap();
        let c = first.find("4 Contacts").unwrap();
        assert!(s < b && b < a && a < c);
    }

    #[test]
    fn user_badge_shows_initials() {
        let mut app = signed_in_app(sample_root());
        app.session = Some(Session::user(&User {
            name: "Ann Lee".into(),
            email: "ann@x.io".into(),
            password: "secret".into(),
        }));
        let out = render_to_string(TERM_W, 2, |frame, area| render_tab_bar(frame, &app, area));
        assert!(out.contains("[AL]"));
    }

    #[test]
    fn board_filter_shows_in_separator() {
        let mut app = signed_in_app(sample_root());
        app.switch_view(View::Board);
        app.set_filter("foot");
        let out = render_to_string(TERM_W, 2, |frame, area| render_tab_bar(frame, &app, area));
        assert!(out.contains("filter: foot"));
    }
}
