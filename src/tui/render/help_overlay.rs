use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, View};

use super::helpers::centered_rect_fixed;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    let bindings: &[(&str, &str)] = match app.view {
        View::Board => &[
            (" \u{2190}\u{2192}/hl", "Previous/next column"),
            (" \u{2191}\u{2193}/jk", "Previous/next card"),
            (" g/G", "First/last card"),
            (" Enter", "Open task"),
            (" Mouse", "Drag a card to another column"),
            (" m", "Move card with the keyboard"),
            (" /", "Find task"),
            (" a", "Add task to this column"),
            (" e", "Edit task"),
            (" d", "Delete task"),
        ],
        View::Contacts => &[
            (" \u{2191}\u{2193}/jk", "Previous/next contact"),
            (" n", "New contact"),
            (" e/Enter", "Edit contact"),
            (" d", "Delete contact"),
        ],
        View::Summary => &[(" Enter/b", "Open the board"), (" a", "Add task")],
        _ => &[],
    };
    if !bindings.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", app.view.title()),
            header_style,
        )));
        for (key, desc) in bindings {
            add_binding(&mut lines, *key, *desc, key_style, desc_style);
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " 1-4", "Switch view", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Next view", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+R", "Reload from the store", key_style, desc_style);
    add_binding(&mut lines, " L", "Log out", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let overlay_area = centered_rect_fixed(56, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, overlay_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Help ", header_style))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// One row: key column padded to a fixed width, then the description
fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("{key:<KEY_COLUMN$}"), key_style),
        Span::styled(desc, desc_style),
    ]));
}

const KEY_COLUMN: usize = 18;
