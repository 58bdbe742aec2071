use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::{Priority, TaskStatus};
use crate::tui::app::App;
use crate::view::summary::{SummaryView, summary};

/// Render the summary page with the current local time
pub fn render_summary_view(frame: &mut Frame, app: &App, area: Rect) {
    let view = summary(&app.board, app.user_name(), Local::now().naive_local());
    render_summary(frame, app, &view, area);
}

/// Render a computed summary
pub fn render_summary(frame: &mut Frame, app: &App, view: &SummaryView, area: Rect) {
    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.text).bg(bg);
    let number_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", view.greeting_line()),
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let urgent_due = view
        .next_urgent_due
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "No urgent deadline".to_string());
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>4} ", view.urgent), number_style),
        Span::styled(
            Priority::Urgent.as_str(),
            Style::default().fg(app.theme.red).bg(bg),
        ),
        Span::styled(format!("   {urgent_due}"), label_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>4} ", view.total), number_style),
        Span::styled("Tasks in board", label_style),
    ]));
    lines.push(Line::from(""));

    for status in TaskStatus::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>4} ", view.count(status)), number_style),
            Span::styled(
                status.label(),
                Style::default().fg(app.theme.status_color(status)).bg(bg),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
