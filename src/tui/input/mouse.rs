use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::drag::{DragOutcome, Point};
use crate::tui::app::{App, Mode, View};

/// Pointer input on the board: press, drag and release a card, or tap to open it
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let overlay_open = app.detail.is_some()
        || app.edit_form.is_some()
        || app.pending_delete.is_some()
        || app.show_help;
    if app.view != View::Board || app.mode != Mode::Navigate || overlay_open {
        app.drag.cancel();
        return;
    }

    let point = Point::cell_center(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(key) = app.layout.card_at(point).map(String::from) else {
                return;
            };
            if app.drag.press(&key, point, &app.layout) {
                app.select_task(&key);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.drag.move_to(point, &app.layout);
        }
        MouseEventKind::Up(MouseButton::Left) => match app.drag.release() {
            DragOutcome::Dropped { key, status, .. } => app.apply_move(&key, status),
            DragOutcome::Tap { key } => {
                app.select_task(&key);
                app.open_detail(&key);
            }
            DragOutcome::None => {}
        },
        MouseEventKind::ScrollUp => {
            app.cursor.row = app.cursor.row.saturating_sub(1);
        }
        MouseEventKind::ScrollDown => {
            app.cursor.row += 1;
            app.clamp_cursor();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::{BoardLayout, Bounds, CardGeometry, ColumnGeometry};
    use crate::io::store::{MemoryStore, Method};
    use crate::model::config::AppConfig;
    use crate::model::task::TaskStatus;
    use crate::model::user::Session;
    use crossterm::event::KeyModifiers;
    use serde_json::json;
    use std::rc::Rc;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Two 20-cell columns; cards "1" and "2" stacked in the first
    fn layout() -> BoardLayout {
        BoardLayout {
            columns: vec![
                ColumnGeometry {
                    status: TaskStatus::ToDo,
                    bounds: Bounds::from_cells(0, 2, 20, 30),
                    cards: vec![
                        CardGeometry {
                            key: "1".into(),
                            bounds: Bounds::from_cells(1, 3, 18, 4),
                        },
                        CardGeometry {
                            key: "2".into(),
                            bounds: Bounds::from_cells(1, 7, 18, 4),
                        },
                    ],
                },
                ColumnGeometry {
                    status: TaskStatus::InProgress,
                    bounds: Bounds::from_cells(20, 2, 20, 30),
                    cards: vec![],
                },
            ],
        }
    }

    fn board_app() -> (App, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::with_root(json!({
            "tasks": {
                "1": {"id": 1, "title": "Login page", "status": "to_do"},
                "2": {"id": 2, "title": "Header", "status": "to_do"}
            }
        })));
        let mut app = App::new(Box::new(store.clone()), &AppConfig::default());
        app.start_session(Session::guest());
        app.switch_view(View::Board);
        app.layout = layout();
        store.clear_calls();
        (app, store)
    }

    #[test]
    fn tap_opens_detail_without_store_calls() {
        let (mut app, store) = board_app();
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 5, 8));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 5, 8));
        assert_eq!(app.detail.as_ref().unwrap().key, "2");
        assert!(store.calls().is_empty());
    }

    #[test]
    fn small_jitter_is_still_a_tap() {
        let (mut app, store) = board_app();
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 5, 4));
        // One cell right is 8px, under the 10px threshold
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 6, 4));
        assert!(!app.drag.is_dragging());
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 6, 4));
        assert_eq!(app.detail.as_ref().unwrap().key, "1");
        assert!(store.writes().is_empty());
    }

    #[test]
    fn drag_across_columns_patches_status_once() {
        let (mut app, store) = board_app();
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 5, 4));
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 25, 5));
        assert!(app.drag.is_dragging());
        assert_eq!(app.drag.hover(), Some(TaskStatus::InProgress));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 25, 5));

        assert_eq!(app.board.task("1").unwrap().status, TaskStatus::InProgress);
        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].method, Method::Patch);
        assert_eq!(writes[0].path, "tasks/1");
        assert_eq!(writes[0].body, Some(json!({"status": "in_progress"})));
        assert!(app.detail.is_none());
        assert!(app.is_flashing("1"));
        assert_eq!(app.cursor_status(), TaskStatus::InProgress);
    }

    #[test]
    fn press_on_empty_space_does_nothing() {
        let (mut app, store) = board_app();
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 25, 10));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 25, 10));
        assert!(app.detail.is_none());
        assert!(store.calls().is_empty());
    }

    #[test]
    fn mouse_is_ignored_outside_the_board() {
        let (mut app, _) = board_app();
        app.view = View::Contacts;
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 5, 4));
        assert!(app.drag.key().is_none());
    }
}
