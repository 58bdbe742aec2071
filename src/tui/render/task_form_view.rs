use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::form::{Field, SubtaskRef, TaskForm, TaskFormFocus};
use crate::model::board::Board;
use crate::model::task::{CATEGORIES, Priority};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::text::truncate_to_width;

use super::helpers::{centered_rect_fixed, error_line, hint_line, input_lines};

/// Add-task page
pub fn render_add_task_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let heading = Line::from(Span::styled(
        format!(" Add task to {}", app.task_form.status.label()),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);
    frame.render_widget(Paragraph::new(heading).style(Style::default().bg(bg)), chunks[0]);
    render_form(frame, &app.theme, &app.board, &app.task_form, chunks[1]);
}

/// Edit-task popup over the board
pub fn render_edit_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.edit_form.as_ref() else {
        return;
    };
    let bg = app.theme.background;
    let popup = centered_rect_fixed(area.width.saturating_sub(4), area.height, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            " Edit task ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    render_form(frame, &app.theme, &app.board, form, inner);
}

/// Two-column form body: text fields and assignees left, the rest right
fn render_form(frame: &mut Frame, theme: &Theme, board: &Board, form: &TaskForm, area: Rect) {
    let bg = theme.background;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let left_w = cols[0].width as usize;
    let right_w = cols[1].width as usize;

    // Left: title, description, assignees
    let mut left: Vec<Line> = Vec::new();
    left.extend(input_lines(
        theme,
        "Title*",
        &form.title,
        form.focus == TaskFormFocus::Title,
        false,
        form.error_for(Field::Title),
        left_w,
    ));
    left.push(Line::from(""));
    left.extend(input_lines(
        theme,
        "Description",
        &form.description,
        form.focus == TaskFormFocus::Description,
        false,
        None,
        left_w,
    ));
    left.push(Line::from(""));
    left.push(label_line(theme, "Assigned to", form.focus == TaskFormFocus::Assigned));
    let contacts = board.sorted_contacts();
    if contacts.is_empty() {
        left.push(Line::from(Span::styled(
            "   No contacts",
            Style::default().fg(theme.dim).bg(bg),
        )));
    }
    for (i, (key, contact)) in contacts.iter().enumerate() {
        let is_cursor = form.focus == TaskFormFocus::Assigned && i == form.assignee_cursor;
        let row_bg = if is_cursor { theme.selection_bg } else { bg };
        let check = if form.is_assigned(&contact.name) {
            "[x]"
        } else {
            "[ ]"
        };
        left.push(Line::from(vec![
            Span::styled(format!("   {check} "), Style::default().fg(theme.text).bg(row_bg)),
            Span::styled(
                format!(" {:<2} ", contact.initials()),
                Style::default()
                    .fg(bg)
                    .bg(theme.contact_color(board.contact_color_index(key)))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", truncate_to_width(&contact.name, left_w.saturating_sub(14))),
                Style::default().fg(theme.text_bright).bg(row_bg),
            ),
        ]));
    }

    // Right: due date, priority, category, subtasks
    let mut right: Vec<Line> = Vec::new();
    right.extend(input_lines(
        theme,
        "Due date* (YYYY-MM-DD)",
        &form.duedate,
        form.focus == TaskFormFocus::DueDate,
        false,
        form.error_for(Field::DueDate),
        right_w,
    ));
    right.push(Line::from(""));
    right.push(label_line(theme, "Prio", form.focus == TaskFormFocus::Priority));
    let mut prio_spans = vec![Span::styled("   ", Style::default().bg(bg))];
    for priority in Priority::ALL {
        let selected = form.priority == priority;
        let style = if selected {
            Style::default()
                .fg(bg)
                .bg(theme.priority_color(priority))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.priority_color(priority)).bg(bg)
        };
        prio_spans.push(Span::styled(
            format!(" {} {} ", priority.as_str(), priority.symbol()),
            style,
        ));
        prio_spans.push(Span::styled(" ", Style::default().bg(bg)));
    }
    right.push(Line::from(prio_spans));
    right.push(Line::from(""));

    right.push(label_line(theme, "Category*", form.focus == TaskFormFocus::Category));
    let category = if form.category.is_empty() {
        "Select task category"
    } else {
        form.category.as_str()
    };
    let cat_color = if form.category.is_empty() {
        theme.dim
    } else {
        theme.category_color(&form.category)
    };
    right.push(Line::from(vec![
        Span::styled("   \u{25C2} ", Style::default().fg(theme.dim).bg(bg)),
        Span::styled(category.to_string(), Style::default().fg(cat_color).bg(bg)),
        Span::styled(
            format!(" \u{25B8}  ({} options)", CATEGORIES.len()),
            Style::default().fg(theme.dim).bg(bg),
        ),
    ]));
    if let Some(message) = form.error_for(Field::Category) {
        right.push(error_line(theme, message));
    }
    right.push(Line::from(""));
    right.extend(subtask_lines(theme, form, right_w));

    left.push(Line::from(""));
    left.push(hint_line(
        theme,
        if form.is_edit() {
            "Ctrl-S ok  Esc close"
        } else {
            "Ctrl-S create task  Ctrl-L clear"
        },
    ));

    frame.render_widget(Paragraph::new(left).style(Style::default().bg(bg)), cols[0]);
    frame.render_widget(Paragraph::new(right).style(Style::default().bg(bg)), cols[1]);
}

fn label_line<'a>(theme: &Theme, label: &str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default()
            .fg(theme.highlight)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(theme.background)
    };
    Line::from(Span::styled(format!(" {label}"), style))
}

/// New-subtask input plus the pending and done items
fn subtask_lines<'a>(theme: &Theme, form: &TaskForm, width: usize) -> Vec<Line<'a>> {
    let bg = theme.background;
    let focused = form.focus == TaskFormFocus::Subtasks;
    let editor = &form.subtasks;
    let editing = editor.editing().map(|(item, _)| *item);

    let mut lines = input_lines(
        theme,
        "Subtasks",
        &editor.new_item,
        focused && editing.is_none(),
        false,
        None,
        width,
    );

    for index in 0..editor.len() {
        let Some(item) = editor.at(index) else {
            continue;
        };
        let is_cursor = focused && index == form.subtask_cursor;
        let row_bg = if is_cursor { theme.selection_bg } else { bg };
        let mark = match item {
            SubtaskRef::Pending(_) => "\u{2022}",
            SubtaskRef::Done(_) => "\u{2713}",
        };
        let text = if editing == Some(item) {
            editor
                .editing()
                .map(|(_, input)| format!("{}\u{258C}", input.as_str()))
                .unwrap_or_default()
        } else {
            editor.text(item).unwrap_or_default().to_string()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("   {mark} "), Style::default().fg(theme.highlight).bg(row_bg)),
            Span::styled(
                truncate_to_width(&text, width.saturating_sub(6)),
                Style::default().fg(theme.text).bg(row_bg),
            ),
        ]));
    }
    if focused {
        lines.push(hint_line(theme, "Enter add  Ctrl-E edit  Ctrl-D delete  Ctrl-T done"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskStatus;
    use crate::tui::app::View;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn add_task_page_shows_fields_and_contacts() {
        let mut app = signed_in_app(sample_root());
        app.open_add_task(TaskStatus::InProgress);
        assert_eq!(app.view, View::AddTask);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_add_task_view(frame, &app, area)
        });
        assert!(out.contains("Add task to In progress"));
        assert!(out.contains("Title*"));
        assert!(out.contains("Anna Meier"));
        assert!(out.contains("Select task category"));
        assert!(out.contains("Medium"));
    }

    #[test]
    fn errors_render_under_their_fields() {
        let mut app = signed_in_app(sample_root());
        app.open_add_task(TaskStatus::ToDo);
        app.task_form.duedate.set("2025-06-01");
        app.task_form.submit();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_add_task_view(frame, &app, area)
        });
        assert_eq!(out.matches("This field is required").count(), 2);
        assert!(out.contains("2025-06-01"));
    }

    #[test]
    fn add_task_with_missing_fields() {
        let mut app = signed_in_app(sample_root());
        app.open_add_task(TaskStatus::ToDo);
        app.task_form.duedate.set("2025-06-01");
        assert!(app.task_form.submit().is_none());
        let output = render_to_string(80, 24, |frame, area| {
            render_add_task_view(frame, &app, area)
        });
        assert_snapshot!(output);
    }

    #[test]
    fn edit_overlay_is_prefilled() {
        let mut app = signed_in_app(sample_root());
        app.switch_view(View::Board);
        let task = app.board.task("1").unwrap();
        app.edit_form = Some(TaskForm::from_task("1", task));
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_edit_overlay(frame, &app, area)
        });
        assert!(out.contains("Edit task"));
        assert!(out.contains("Login page"));
        assert!(out.contains("Sketch"));
        assert!(out.contains("Specs"));
        assert!(out.contains("[x]"));
    }
}
