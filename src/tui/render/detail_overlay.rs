use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, PendingDelete};
use crate::view::detail::task_detail;

use super::board_view::badge_spans;
use super::helpers::{centered_rect_fixed, hint_line, wrap_text};

/// Task detail popup: everything about the task, subtasks toggleable
pub fn render_detail_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = app.detail.as_ref() else {
        return;
    };
    let Some(view) = task_detail(&app.board, &state.key) else {
        return;
    };
    let bg = app.theme.background;
    let popup = centered_rect_fixed(64, area.height.saturating_sub(2), area);
    let inner_w = popup.width.saturating_sub(2) as usize;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default().fg(app.theme.text_bright).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    let category = if view.category.is_empty() {
        "No category"
    } else {
        view.category.as_str()
    };
    lines.push(Line::from(Span::styled(
        format!(" {category}"),
        Style::default()
            .fg(app.theme.category_color(&view.category))
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    for s in wrap_text(" ", &view.title, inner_w) {
        lines.push(Line::from(Span::styled(
            s,
            value.add_modifier(Modifier::BOLD),
        )));
    }
    if !view.description.trim().is_empty() {
        lines.push(Line::from(""));
        for s in wrap_text(" ", &view.description, inner_w) {
            lines.push(Line::from(Span::styled(
                s,
                Style::default().fg(app.theme.text).bg(bg),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Due date:  ", label),
        Span::styled(view.due_label(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Priority:  ", label),
        Span::styled(
            format!("{} {}", view.priority.as_str(), view.priority.symbol()),
            Style::default()
                .fg(app.theme.priority_color(view.priority))
                .bg(bg),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Status:    ", label),
        Span::styled(
            view.status.label(),
            Style::default().fg(app.theme.status_color(view.status)).bg(bg),
        ),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Assigned To:", label)));
    if view.assignees.is_empty() {
        lines.push(Line::from(Span::styled("   nobody", label)));
    }
    for assignee in &view.assignees {
        let mut spans = vec![Span::styled("   ", Style::default().bg(bg))];
        spans.extend(badge_spans(&app.theme, bg, std::slice::from_ref(&assignee.badge)));
        spans.push(Span::styled(assignee.badge.name.clone(), value));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Subtasks", label)));
    if view.subtasks.is_empty() {
        lines.push(Line::from(Span::styled("   none", label)));
    }
    for (i, subtask) in view.subtasks.iter().enumerate() {
        let row_bg = if i == state.subtask_cursor {
            app.theme.selection_bg
        } else {
            bg
        };
        let (check, style) = if subtask.done {
            (
                "[x]",
                Style::default()
                    .fg(app.theme.dim)
                    .bg(row_bg)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            ("[ ]", Style::default().fg(app.theme.text).bg(row_bg))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("   {check} "), Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(subtask.text.clone(), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(&app.theme, "Space toggle  e edit  d delete  m move  Esc close"));

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// "Delete …? y/n" popup for the pending delete
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pending) = app.pending_delete.as_ref() else {
        return;
    };
    let what = match pending {
        PendingDelete::Task(key) => app
            .board
            .task(key)
            .map(|t| format!("task \"{}\"", t.title)),
        PendingDelete::Contact(key) => app.board.contact(key).map(|c| c.name.clone()),
    }
    .unwrap_or_else(|| "this item".to_string());

    let bg = app.theme.background;
    let popup_w: u16 = 48.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for s in wrap_text(" ", &format!("Delete {what}?"), inner_w) {
        lines.push(Line::from(Span::styled(
            s,
            Style::default().fg(app.theme.text_bright).bg(bg),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " y/n",
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  confirm / cancel", Style::default().fg(app.theme.dim).bg(bg)),
    ]));

    let popup = centered_rect_fixed(popup_w, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
