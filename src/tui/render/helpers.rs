use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::form::TextInput;
use crate::tui::theme::Theme;
use crate::util::text::{display_width, truncate_to_width};

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| display_width(&s.content)).sum()
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_len = display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();

    for word in text.split_whitespace() {
        let cur_w = display_width(&current);
        let space = if cur_w == indent_len { 0 } else { 1 };
        if cur_w + space + display_width(word) > max_width && cur_w > indent_len {
            lines.push(current);
            current = indent.to_string();
        }
        if display_width(&current) > indent_len {
            current.push(' ');
        }
        current.push_str(word);
    }
    if display_width(&current) > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Label line, input line (with a block cursor when focused) and the
/// field's inline error, if any
pub(super) fn input_lines<'a>(
    theme: &Theme,
    label: &str,
    input: &TextInput,
    focused: bool,
    masked: bool,
    error: Option<&str>,
    width: usize,
) -> Vec<Line<'a>> {
    let bg = theme.background;
    let label_style = if focused {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };
    let text = if masked {
        "*".repeat(input.as_str().chars().count())
    } else {
        input.as_str().to_string()
    };
    let text = truncate_to_width(&text, width.saturating_sub(4));
    let border = if focused { theme.selection_border } else { theme.dim };

    let mut input_spans = vec![
        Span::styled(" \u{2502} ", Style::default().fg(border).bg(bg)),
        Span::styled(text, Style::default().fg(theme.text_bright).bg(bg)),
    ];
    if focused {
        input_spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }

    let mut lines = vec![
        Line::from(Span::styled(format!(" {label}"), label_style)),
        Line::from(input_spans),
    ];
    if let Some(message) = error {
        lines.push(error_line(theme, message));
    }
    lines
}

/// Inline validation message under a field
pub(super) fn error_line<'a>(theme: &Theme, message: &str) -> Line<'a> {
    Line::from(Span::styled(
        format!("   {message}"),
        Style::default().fg(theme.red).bg(theme.background),
    ))
}

/// Key hint line for the bottom of an overlay
pub(super) fn hint_line<'a>(theme: &Theme, hint: &str) -> Line<'a> {
    Line::from(Span::styled(
        format!(" {hint}"),
        Style::default().fg(theme.dim).bg(theme.background),
    ))
}
