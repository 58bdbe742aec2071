use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::form::Field;
use crate::tui::app::App;
use crate::util::text::truncate_to_width;
use crate::view::contacts::{ContactRow, contact_list};

use super::helpers::{centered_rect_fixed, hint_line, input_lines};

/// Contact list grouped by letter, with the selected contact's details beside it
pub fn render_contacts_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let groups = contact_list(&app.board);
    if groups.is_empty() {
        let empty = Paragraph::new(" No contacts yet. Press n to add one.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let width = chunks[0].width as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;
    let mut selected: Option<&ContactRow> = None;
    let mut index = 0;
    for group in &groups {
        lines.push(Line::from(Span::styled(
            format!(" {}", group.letter),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {}", "\u{2500}".repeat(width.saturating_sub(2))),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        for row in &group.contacts {
            let is_cursor = index == app.contact_cursor;
            if is_cursor {
                cursor_line = lines.len();
                selected = Some(row);
            }
            let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
            lines.push(Line::from(vec![
                Span::styled(" ", Style::default().bg(row_bg)),
                Span::styled(
                    format!(" {:<2} ", row.initials),
                    Style::default()
                        .fg(bg)
                        .bg(app.theme.contact_color(Some(row.color_index)))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", truncate_to_width(&row.name, width.saturating_sub(8))),
                    Style::default().fg(app.theme.text_bright).bg(row_bg),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("      {}", truncate_to_width(&row.email, width.saturating_sub(8))),
                Style::default().fg(app.theme.highlight).bg(row_bg),
            )));
            index += 1;
        }
    }

    // Keep the cursor row on screen
    let visible = chunks[0].height as usize;
    let scroll = (cursor_line + 2).saturating_sub(visible);
    let list = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .scroll((scroll as u16, 0));
    frame.render_widget(list, chunks[0]);

    if let Some(row) = selected {
        render_contact_detail(frame, app, row, chunks[1]);
    }
}

fn render_contact_detail(frame: &mut Frame, app: &App, row: &ContactRow, area: Rect) {
    let bg = app.theme.background;
    let label = Style::default().fg(app.theme.text_bright).bg(bg).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled(
                format!("  {}  ", row.initials),
                Style::default()
                    .fg(bg)
                    .bg(app.theme.contact_color(Some(row.color_index)))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", row.name),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Contact Information", label)),
        Line::from(""),
        Line::from(Span::styled("  Email", label)),
        Line::from(Span::styled(
            format!("  {}", row.email),
            Style::default().fg(app.theme.highlight).bg(bg),
        )),
        Line::from(""),
        Line::from(Span::styled("  Phone", label)),
        Line::from(Span::styled(
            format!("  {}", row.phone),
            Style::default().fg(app.theme.text).bg(bg),
        )),
    ];
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Add/edit contact popup
pub fn render_contact_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.contact_form.as_ref() else {
        return;
    };
    let bg = app.theme.background;
    let popup = centered_rect_fixed(52, 16, area);
    let width = popup.width.saturating_sub(2) as usize;

    let title = if form.editing_key.is_some() {
        " Edit contact "
    } else {
        " Add contact "
    };

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in [Field::Name, Field::Email, Field::Phone].into_iter().enumerate() {
        let input = match field {
            Field::Name => &form.name,
            Field::Email => &form.email,
            _ => &form.phone,
        };
        lines.extend(input_lines(
            &app.theme,
            field.label(),
            input,
            form.focus == i,
            false,
            form.error_for(field),
            width,
        ));
    }
    lines.push(Line::from(""));
    let action = if form.editing_key.is_some() {
        "Enter save  Esc cancel"
    } else {
        "Enter create contact  Esc cancel"
    };
    lines.push(hint_line(&app.theme, action));

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
