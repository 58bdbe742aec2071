//! Pointer drag-and-drop of cards between status columns.
//!
//! The engine only tracks pointer state against a [`BoardLayout`]; it never
//! touches the board. A finished drag yields a [`DragOutcome`] that the caller
//! turns into a status change.

pub mod geometry;

pub use geometry::{BoardLayout, Bounds, CardGeometry, ColumnGeometry, Point};

use crate::model::task::TaskStatus;

/// Movement in pixels, on either axis, that turns a press into a drag
pub const DEFAULT_DRAG_THRESHOLD: i32 = 10;

/// Where a dragged card would land: column plus index among the other cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub status: TaskStatus,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
}

/// Result of releasing the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing was pressed
    None,
    /// Released without passing the threshold
    Tap { key: String },
    /// Released after dragging; `status` is the placeholder's column
    Dropped {
        key: String,
        status: TaskStatus,
        index: usize,
    },
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    key: String,
    origin: Point,
    /// Pointer offset from the card's top-left corner at press time
    grab: Point,
    pointer: Point,
    slot: Slot,
    hover: Option<TaskStatus>,
    dragging: bool,
}

#[derive(Debug, Clone)]
pub struct DragEngine {
    threshold: i32,
    active: Option<ActiveDrag>,
}

impl Default for DragEngine {
    fn default() -> Self {
        DragEngine::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragEngine {
    pub fn new(threshold: i32) -> Self {
        DragEngine {
            threshold: threshold.max(0),
            active: None,
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn phase(&self) -> DragPhase {
        match &self.active {
            None => DragPhase::Idle,
            Some(a) if a.dragging => DragPhase::Dragging,
            Some(_) => DragPhase::Pressed,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    /// Key of the pressed or dragged card
    pub fn key(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.key.as_str())
    }

    /// Current placeholder slot
    pub fn slot(&self) -> Option<Slot> {
        self.active.as_ref().map(|a| a.slot)
    }

    /// Column currently marked as drop target (only while dragging)
    pub fn hover(&self) -> Option<TaskStatus> {
        self.active.as_ref().and_then(|a| a.hover)
    }

    pub fn pointer(&self) -> Option<Point> {
        self.active.as_ref().map(|a| a.pointer)
    }

    pub fn origin(&self) -> Option<Point> {
        self.active.as_ref().map(|a| a.origin)
    }

    /// Top-left corner of the floating card so it follows the pointer
    pub fn ghost_origin(&self) -> Option<Point> {
        let a = self.active.as_ref().filter(|a| a.dragging)?;
        Some(Point::new(a.pointer.x - a.grab.x, a.pointer.y - a.grab.y))
    }

    /// Pointer down on a card. Returns false if `key` is not in the layout.
    pub fn press(&mut self, key: &str, point: Point, layout: &BoardLayout) -> bool {
        let Some((column, index)) = layout.locate(key) else {
            return false;
        };
        let card = &column.cards[index];
        self.active = Some(ActiveDrag {
            key: key.to_string(),
            origin: point,
            grab: Point::new(point.x - card.bounds.x, point.y - card.bounds.y),
            pointer: point,
            slot: Slot {
                status: column.status,
                index,
            },
            hover: None,
            dragging: false,
        });
        true
    }

    /// Pointer moved. Returns true when the visible drag state changed.
    pub fn move_to(&mut self, point: Point, layout: &BoardLayout) -> bool {
        let threshold = self.threshold;
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.pointer = point;
        if !active.dragging {
            let dx = (point.x - active.origin.x).abs();
            let dy = (point.y - active.origin.y).abs();
            if dx <= threshold && dy <= threshold {
                return false;
            }
            active.dragging = true;
            tracing::debug!(key = %active.key, "drag started");
        }

        match layout.column_at(point) {
            Some(column) => {
                let index = column
                    .cards
                    .iter()
                    .filter(|card| card.key != active.key)
                    .position(|card| card.bounds.mid_y() > point.y)
                    .unwrap_or_else(|| {
                        column.cards.iter().filter(|c| c.key != active.key).count()
                    });
                active.slot = Slot {
                    status: column.status,
                    index,
                };
                active.hover = Some(column.status);
            }
            None => active.hover = None,
        }
        true
    }

    /// Pointer up
    pub fn release(&mut self) -> DragOutcome {
        match self.active.take() {
            None => DragOutcome::None,
            Some(a) if a.dragging => {
                tracing::debug!(key = %a.key, status = %a.slot.status, "card dropped");
                DragOutcome::Dropped {
                    key: a.key,
                    status: a.slot.status,
                    index: a.slot.index,
                }
            }
            Some(a) => DragOutcome::Tap { key: a.key },
        }
    }

    /// Abort without an outcome
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::board_io::load_board;
    use crate::io::store::{DocumentStore, MemoryStore, Method};
    use crate::ops::task_ops::move_task;
    use serde_json::json;

    const COL_W: i32 = 200;
    const CARD_H: i32 = 40;

    /// Four 200px columns; cards stacked from y=20 with 10px gaps
    fn layout(columns: &[&[&str]]) -> BoardLayout {
        BoardLayout {
            columns: columns
                .iter()
                .enumerate()
                .map(|(i, keys)| {
                    let x = i as i32 * COL_W;
                    ColumnGeometry {
                        status: TaskStatus::ALL[i],
                        bounds: Bounds::new(x, 0, COL_W, 600),
                        cards: keys
                            .iter()
                            .enumerate()
                            .map(|(j, k)| CardGeometry {
                                key: k.to_string(),
                                bounds: Bounds::new(x, 20 + j as i32 * (CARD_H + 10), COL_W, CARD_H),
                            })
                            .collect(),
                    }
                })
                .collect(),
        }
    }

    fn standard() -> BoardLayout {
        layout(&[&["1", "2"], &["3"], &[], &["4"]])
    }

    /// Apply an outcome the way the board view does
    fn apply(store: &dyn DocumentStore, outcome: &DragOutcome) -> Option<TaskStatus> {
        let mut board = load_board(store).unwrap();
        if let DragOutcome::Dropped { key, status, .. } = outcome {
            move_task(store, &mut board, key, *status).unwrap();
        }
        board.task("1").map(|t| t.status)
    }

    fn store() -> MemoryStore {
        MemoryStore::with_root(json!({
            "tasks": {"1": {"id": 1, "title": "A", "status": "to_do"}}
        }))
    }

    #[test]
    fn press_places_placeholder_at_own_position() {
        let mut engine = DragEngine::default();
        assert!(engine.press("2", Point::new(10, 75), &standard()));
        assert_eq!(engine.phase(), DragPhase::Pressed);
        assert_eq!(
            engine.slot(),
            Some(Slot {
                status: TaskStatus::ToDo,
                index: 1
            })
        );
        assert!(!engine.press("99", Point::new(0, 0), &standard()));
    }

    #[test]
    fn movement_within_threshold_is_a_tap_with_no_store_call() {
        for (dx, dy) in [(0, 0), (10, 0), (0, -10), (7, 9), (-10, 10)] {
            let layout = standard();
            let store = store();
            store.clear_calls();
            let mut engine = DragEngine::default();
            engine.press("1", Point::new(50, 30), &layout);
            assert!(!engine.move_to(Point::new(50 + dx, 30 + dy), &layout));
            let outcome = engine.release();
            assert_eq!(outcome, DragOutcome::Tap { key: "1".into() });
            assert_eq!(apply(&store, &outcome), Some(TaskStatus::ToDo));
            assert!(store.writes().is_empty());
            assert_eq!(engine.phase(), DragPhase::Idle);
        }
    }

    #[test]
    fn either_axis_alone_starts_a_drag() {
        let layout = standard();
        let mut engine = DragEngine::default();
        engine.press("1", Point::new(50, 30), &layout);
        engine.move_to(Point::new(61, 30), &layout);
        assert!(engine.is_dragging());

        let mut engine = DragEngine::default();
        engine.press("1", Point::new(50, 30), &layout);
        engine.move_to(Point::new(50, 19), &layout);
        assert!(engine.is_dragging());
    }

    #[test]
    fn drop_in_column_issues_one_patch_with_that_status() {
        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            let layout = standard();
            let store = store();
            store.clear_calls();
            let mut engine = DragEngine::default();
            engine.press("1", Point::new(50, 30), &layout);
            engine.move_to(Point::new(i as i32 * COL_W + 60, 500), &layout);
            assert_eq!(engine.hover(), Some(*status));
            let outcome = engine.release();
            let DragOutcome::Dropped { status: dropped, .. } = &outcome else {
                panic!("expected a drop, got {outcome:?}");
            };
            assert_eq!(dropped, status);

            assert_eq!(apply(&store, &outcome), Some(*status));
            let writes = store.writes();
            assert_eq!(writes.len(), 1);
            assert_eq!(writes[0].method, Method::Patch);
            assert_eq!(writes[0].path, "tasks/1");
            assert_eq!(writes[0].body, Some(json!({"status": status.as_str()})));
        }
    }

    #[test]
    fn placeholder_goes_before_first_card_below_pointer() {
        let layout = standard();
        let mut engine = DragEngine::default();
        engine.press("4", Point::new(610, 30), &layout);

        // Above the midpoint of card 1 (y=40)
        engine.move_to(Point::new(20, 35), &layout);
        assert_eq!(engine.slot().unwrap().index, 0);
        // Between 1 (mid 40) and 2 (mid 90)
        engine.move_to(Point::new(20, 60), &layout);
        assert_eq!(engine.slot().unwrap().index, 1);
        // Below everything
        engine.move_to(Point::new(20, 400), &layout);
        assert_eq!(engine.slot().unwrap().index, 2);
        // Empty column
        engine.move_to(Point::new(420, 10), &layout);
        assert_eq!(
            engine.slot(),
            Some(Slot {
                status: TaskStatus::AwaitFeedback,
                index: 0
            })
        );
    }

    #[test]
    fn dragged_card_is_excluded_from_siblings() {
        let layout = standard();
        let mut engine = DragEngine::default();
        engine.press("1", Point::new(50, 30), &layout);
        // Below card 1's midpoint but above card 2's: card 2 is the first sibling
        engine.move_to(Point::new(50, 70), &layout);
        assert_eq!(
            engine.slot(),
            Some(Slot {
                status: TaskStatus::ToDo,
                index: 0
            })
        );
    }

    #[test]
    fn leaving_all_columns_keeps_slot_and_clears_hover() {
        let layout = standard();
        let mut engine = DragEngine::default();
        engine.press("1", Point::new(50, 30), &layout);
        engine.move_to(Point::new(250, 100), &layout);
        assert_eq!(engine.hover(), Some(TaskStatus::InProgress));
        engine.move_to(Point::new(2000, 100), &layout);
        assert_eq!(engine.hover(), None);
        assert_eq!(engine.slot().unwrap().status, TaskStatus::InProgress);
        assert_eq!(
            engine.release(),
            DragOutcome::Dropped {
                key: "1".into(),
                status: TaskStatus::InProgress,
                index: 1
            }
        );
    }

    #[test]
    fn drop_in_same_column_still_patches_once() {
        let layout = standard();
        let store = store();
        store.clear_calls();
        let mut engine = DragEngine::default();
        engine.press("1", Point::new(50, 30), &layout);
        engine.move_to(Point::new(50, 300), &layout);
        let outcome = engine.release();
        assert_eq!(apply(&store, &outcome), Some(TaskStatus::ToDo));
        assert_eq!(store.writes().len(), 1);
    }

    #[test]
    fn ghost_follows_pointer_with_grab_offset() {
        let layout = standard();
        let mut engine = DragEngine::default();
        engine.press("1", Point::new(50, 30), &layout);
        assert_eq!(engine.ghost_origin(), None);
        engine.move_to(Point::new(150, 130), &layout);
        assert_eq!(engine.ghost_origin(), Some(Point::new(100, 120)));
    }

    #[test]
    fn cancel_and_idle_release() {
        let layout = standard();
        let mut engine = DragEngine::default();
        assert_eq!(engine.release(), DragOutcome::None);
        assert!(!engine.move_to(Point::new(1, 1), &layout));
        engine.press("3", Point::new(210, 30), &layout);
        engine.move_to(Point::new(600, 30), &layout);
        engine.cancel();
        assert_eq!(engine.phase(), DragPhase::Idle);
        assert_eq!(engine.release(), DragOutcome::None);
    }

    #[test]
    fn custom_threshold() {
        let layout = standard();
        let mut engine = DragEngine::new(0);
        engine.press("1", Point::new(50, 30), &layout);
        assert!(engine.move_to(Point::new(51, 30), &layout));
        assert!(engine.is_dragging());
    }
}
