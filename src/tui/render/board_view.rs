use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use regex::Regex;

use crate::drag::{BoardLayout, Bounds, CardGeometry, ColumnGeometry};
use crate::model::task::TaskStatus;
use crate::tui::app::{App, Mode};
use crate::tui::theme::Theme;
use crate::util::text::truncate_to_width;
use crate::view::board::{Badge, CardView, board_view};

use super::push_highlighted_spans;

/// Rows per card, borders included
pub const CARD_HEIGHT: u16 = 7;

/// Badges drawn before collapsing the rest into `+N`
const MAX_BADGES: usize = 3;

/// How a card is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardLook {
    Normal,
    Selected,
    /// Just moved or floating under the pointer
    Lifted,
}

/// Render the four status columns and record their geometry for hit-testing
pub fn render_board_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let view = board_view(&app.board, &app.filter);
    let search_re = app.active_search_re();
    let dragging_key = app
        .drag
        .is_dragging()
        .then(|| app.drag.key().map(String::from))
        .flatten();
    let slot = app.drag.slot().filter(|_| dragging_key.is_some());

    let column_rects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let mut layout = BoardLayout::default();
    let mut ghost: Option<&CardView> = None;

    for (column, rect) in view.columns.iter().zip(column_rects.iter()) {
        let status = column.status;
        let is_target = app.drag.hover() == Some(status)
            || (app.mode == Mode::Move
                && app.move_state.as_ref().is_some_and(|m| m.target == status));
        let is_cursor_column = app.cursor_status() == status;

        let border_color = if is_target {
            app.theme.drop_target
        } else if is_cursor_column {
            app.theme.dim
        } else {
            app.theme.selection_bg
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color).bg(app.theme.background))
            .title(Span::styled(
                format!(" {} ({}) ", column.label(), column.cards.len()),
                Style::default()
                    .fg(app.theme.status_color(status))
                    .bg(app.theme.background)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(app.theme.background));
        let inner = block.inner(*rect);
        frame.render_widget(block, *rect);

        let mut geometry = ColumnGeometry {
            status,
            bounds: Bounds::from_cells(rect.x, rect.y, rect.width, rect.height),
            cards: Vec::new(),
        };

        // Cards in flow: the dragged card leaves its column, the placeholder joins one
        let mut flow: Vec<Option<&CardView>> = Vec::new();
        for card in &column.cards {
            if dragging_key.as_deref() == Some(card.key.as_str()) {
                ghost = Some(card);
                continue;
            }
            flow.push(Some(card));
        }
        if let Some(slot) = slot
            && slot.status == status
        {
            flow.insert(slot.index.min(flow.len()), None);
        }

        if flow.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                format!(" {}", column.empty_text()),
                Style::default().fg(app.theme.dim).bg(app.theme.background),
            )));
            frame.render_widget(empty, inner);
            layout.columns.push(geometry);
            continue;
        }

        let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
        let cursor_row = if is_cursor_column && dragging_key.is_none() {
            Some(app.cursor.row)
        } else {
            None
        };
        let skip = cursor_row.map_or(0, |row| (row + 1).saturating_sub(visible));

        for (i, item) in flow.iter().enumerate().skip(skip).take(visible) {
            let y = inner.y + (i - skip) as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(inner.y + inner.height - y);
            let card_rect = Rect::new(inner.x, y, inner.width, height);
            match item {
                Some(card) => {
                    let look = if app.is_flashing(&card.key) {
                        CardLook::Lifted
                    } else if cursor_row == Some(i) {
                        CardLook::Selected
                    } else {
                        CardLook::Normal
                    };
                    render_card(frame, &app.theme, card, card_rect, look, search_re.as_ref());
                    geometry.cards.push(CardGeometry {
                        key: card.key.clone(),
                        bounds: Bounds::from_cells(
                            card_rect.x,
                            card_rect.y,
                            card_rect.width,
                            card_rect.height,
                        ),
                    });
                }
                None => render_placeholder(frame, &app.theme, card_rect),
            }
        }
        layout.columns.push(geometry);
    }

    // Floating card under the pointer
    if let (Some(card), Some(origin)) = (ghost, app.drag.ghost_origin()) {
        let (cx, cy) = origin.to_cell();
        let width = column_rects[0].width.saturating_sub(2);
        let x = (cx.max(0) as u16).min(area.right().saturating_sub(width));
        let y = (cy.max(0) as u16)
            .max(area.y)
            .min(area.bottom().saturating_sub(CARD_HEIGHT));
        let rect = Rect::new(x, y, width, CARD_HEIGHT).intersection(area);
        frame.render_widget(Clear, rect);
        render_card(frame, &app.theme, card, rect, CardLook::Lifted, None);
    }

    app.layout = layout;
}

fn render_card(
    frame: &mut Frame,
    theme: &Theme,
    card: &CardView,
    rect: Rect,
    look: CardLook,
    search_re: Option<&Regex>,
) {
    let bg = match look {
        CardLook::Lifted => theme.drag_bg,
        CardLook::Selected => theme.selection_bg,
        CardLook::Normal => theme.background,
    };
    let border = match look {
        CardLook::Selected => theme.selection_border,
        _ => theme.dim,
    };
    let width = rect.width.saturating_sub(2) as usize;
    let base = Style::default().bg(bg);

    let mut lines: Vec<Line> = Vec::new();

    let category = if card.category.is_empty() {
        "No category"
    } else {
        card.category.as_str()
    };
    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_to_width(category, width.saturating_sub(1))),
        base.fg(theme.category_color(&card.category))
            .add_modifier(Modifier::BOLD),
    )));

    let mut title_spans = vec![Span::styled(" ", base)];
    push_highlighted_spans(
        &mut title_spans,
        &truncate_to_width(&card.title, width.saturating_sub(1)),
        base.fg(theme.text_bright).add_modifier(Modifier::BOLD),
        base.fg(theme.search_match_fg).bg(theme.search_match_bg),
        search_re,
    );
    lines.push(Line::from(title_spans));

    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_to_width(&card.excerpt, width.saturating_sub(1))),
        base.fg(theme.dim),
    )));

    lines.push(match card.progress {
        Some((done, total)) => progress_line(theme, bg, done, total, width),
        None => Line::from(Span::styled("", base)),
    });

    let mut bottom = vec![Span::styled(" ", base)];
    bottom.extend(badge_spans(theme, bg, &card.badges));
    let used: usize = bottom.iter().map(|s| s.content.chars().count()).sum();
    let symbol = card.priority.symbol();
    let pad = width.saturating_sub(used + symbol.chars().count() + 1);
    bottom.push(Span::styled(" ".repeat(pad), base));
    bottom.push(Span::styled(
        symbol,
        base.fg(theme.priority_color(card.priority))
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(bottom));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border).bg(bg))
        .style(base);
    frame.render_widget(Paragraph::new(lines).block(block).style(base), rect);
}

/// `▰▰▱▱ 1/2 Subtasks`
fn progress_line<'a>(theme: &Theme, bg: Color, done: usize, total: usize, width: usize) -> Line<'a> {
    let label = format!(" {done}/{total} Subtasks");
    let bar_w = width.saturating_sub(label.chars().count() + 1).min(10);
    let filled = if total == 0 { 0 } else { done * bar_w / total };
    Line::from(vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            "\u{25B0}".repeat(filled),
            Style::default().fg(theme.highlight).bg(bg),
        ),
        Span::styled(
            "\u{25B1}".repeat(bar_w - filled),
            Style::default().fg(theme.dim).bg(bg),
        ),
        Span::styled(label, Style::default().fg(theme.text).bg(bg)),
    ])
}

pub(super) fn badge_spans<'a>(theme: &Theme, bg: Color, badges: &[Badge]) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for badge in badges.iter().take(MAX_BADGES) {
        spans.push(Span::styled(
            format!(" {} ", badge.initials),
            Style::default()
                .fg(theme.background)
                .bg(theme.contact_color(badge.color_index))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }
    if badges.len() > MAX_BADGES {
        spans.push(Span::styled(
            format!("+{}", badges.len() - MAX_BADGES),
            Style::default().fg(theme.text).bg(bg),
        ));
    }
    spans
}

/// Dashed outline where the dragged card would land
fn render_placeholder(frame: &mut Frame, theme: &Theme, rect: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme.drop_target).bg(theme.background))
        .style(Style::default().bg(theme.background));
    frame.render_widget(block, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::Point;
    use crate::tui::app::View;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    fn board_app() -> App {
        let mut app = signed_in_app(sample_root());
        app.switch_view(View::Board);
        app
    }

    fn render(app: &mut App) -> String {
        render_sized(app, TERM_W, TERM_H)
    }

    fn render_sized(app: &mut App, w: u16, h: u16) -> String {
        render_to_string(w, h, |frame, area| render_board_view(frame, app, area))
    }

    #[test]
    fn columns_show_labels_counts_and_cards() {
        let mut app = board_app();
        let out = render(&mut app);
        assert!(out.contains("To do (2)"));
        assert!(out.contains("In progress (1)"));
        assert!(out.contains("Login page"));
        assert!(out.contains("Footer"));
        assert!(out.contains("1/2 Subtasks"));
        assert!(out.contains(" AM "));
    }

    #[test]
    fn empty_columns_show_placeholder_text() {
        let mut app = board_app();
        let out = render(&mut app);
        assert!(out.contains("No tasks Done"));
        assert!(out.contains("No tasks Await feedback"));
    }

    #[test]
    fn render_records_card_geometry() {
        let mut app = board_app();
        render(&mut app);
        assert_eq!(app.layout.columns.len(), 4);
        let todo = app.layout.column(TaskStatus::ToDo).unwrap();
        let keys: Vec<&str> = todo.cards.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2"]);
        assert!(todo.cards[0].bounds.mid_y() < todo.cards[1].bounds.mid_y());
        let inside = todo.cards[1].bounds.origin();
        assert_eq!(
            app.layout.card_at(Point::new(inside.x + 1, inside.y + 1)),
            Some("2")
        );
        let column = app.layout.column_at(Point::cell_center(1, 3)).unwrap();
        assert_eq!(column.status, TaskStatus::ToDo);
    }

    #[test]
    fn filter_hides_cards_and_counts_follow() {
        let mut app = board_app();
        app.set_filter("foot");
        let out = render(&mut app);
        assert!(out.contains("To do (0)"));
        assert!(!out.contains("Login page"));
        assert!(out.contains("Footer"));
    }

    #[test]
    fn dragging_moves_card_out_of_flow() {
        let mut app = board_app();
        render(&mut app);
        let card = app.layout.locate("1").unwrap().0.cards[0].bounds;
        let press = Point::new(card.x + 4, card.y + 4);
        assert!(app.drag.press("1", press, &app.layout));
        let done_col = app.layout.column(TaskStatus::Done).unwrap().bounds;
        let layout = app.layout.clone();
        app.drag
            .move_to(Point::new(done_col.x + 16, done_col.y + 40), &layout);
        render(&mut app);
        let todo = app.layout.column(TaskStatus::ToDo).unwrap();
        assert_eq!(todo.cards.len(), 1);
        assert_eq!(todo.cards[0].key, "2");
        // Board data is untouched until the drop
        assert_eq!(app.board.task("1").unwrap().status, TaskStatus::ToDo);
    }

    #[test]
    fn dragging_shows_placeholder_and_ghost() {
        let mut app = board_app();
        render_sized(&mut app, 64, 16);
        let card = app.layout.locate("1").unwrap().0.cards[0].bounds;
        assert!(app.drag.press("1", Point::new(card.x + 4, card.y + 4), &app.layout));
        let done_col = app.layout.column(TaskStatus::Done).unwrap().bounds;
        let layout = app.layout.clone();
        app.drag
            .move_to(Point::new(done_col.x + 40, done_col.y + 136), &layout);
        let output = render_sized(&mut app, 64, 16);
        assert_snapshot!(output);
    }
}
