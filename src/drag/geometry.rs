use crate::model::task::TaskStatus;

/// Pixel size of one terminal cell, used to map mouse cells to pixels
pub const CELL_WIDTH_PX: i32 = 8;
pub const CELL_HEIGHT_PX: i32 = 16;

/// A pointer position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Top-left pixel of a terminal cell
    pub fn from_cell(column: u16, row: u16) -> Self {
        Point {
            x: i32::from(column) * CELL_WIDTH_PX,
            y: i32::from(row) * CELL_HEIGHT_PX,
        }
    }

    /// Center pixel of a terminal cell, where mouse events are taken to land
    pub fn cell_center(column: u16, row: u16) -> Self {
        let top_left = Point::from_cell(column, row);
        Point {
            x: top_left.x + CELL_WIDTH_PX / 2,
            y: top_left.y + CELL_HEIGHT_PX / 2,
        }
    }

    /// Terminal cell containing this pixel
    pub fn to_cell(self) -> (i32, i32) {
        (
            self.x.div_euclid(CELL_WIDTH_PX),
            self.y.div_euclid(CELL_HEIGHT_PX),
        )
    }
}

/// An axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of a block of terminal cells
    pub fn from_cells(column: u16, row: u16, width: u16, height: u16) -> Self {
        Bounds {
            x: i32::from(column) * CELL_WIDTH_PX,
            y: i32::from(row) * CELL_HEIGHT_PX,
            width: i32::from(width) * CELL_WIDTH_PX,
            height: i32::from(height) * CELL_HEIGHT_PX,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn mid_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A rendered card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGeometry {
    pub key: String,
    pub bounds: Bounds,
}

/// A rendered status column and its cards, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGeometry {
    pub status: TaskStatus,
    pub bounds: Bounds,
    pub cards: Vec<CardGeometry>,
}

/// Where everything on the board was drawn in the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    pub columns: Vec<ColumnGeometry>,
}

impl BoardLayout {
    pub fn column_at(&self, p: Point) -> Option<&ColumnGeometry> {
        self.columns.iter().find(|c| c.bounds.contains(p))
    }

    pub fn column(&self, status: TaskStatus) -> Option<&ColumnGeometry> {
        self.columns.iter().find(|c| c.status == status)
    }

    /// Key of the card under the pointer
    pub fn card_at(&self, p: Point) -> Option<&str> {
        self.column_at(p)?
            .cards
            .iter()
            .find(|card| card.bounds.contains(p))
            .map(|card| card.key.as_str())
    }

    /// The column holding `key` and the card's index in it
    pub fn locate(&self, key: &str) -> Option<(&ColumnGeometry, usize)> {
        self.columns.iter().find_map(|col| {
            col.cards
                .iter()
                .position(|card| card.key == key)
                .map(|i| (col, i))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_to_pixels() {
        assert_eq!(Point::from_cell(2, 3), Point::new(16, 48));
        assert_eq!(Point::new(17, 63).to_cell(), (2, 3));
        assert_eq!(Point::cell_center(2, 3), Point::new(20, 56));
        let b = Bounds::from_cells(1, 1, 2, 2);
        assert_eq!(b, Bounds::new(8, 16, 16, 32));
        assert!(b.contains(Point::new(8, 16)));
        assert!(!b.contains(Point::new(24, 16)));
        assert_eq!(b.mid_y(), 32);
    }

    #[test]
    fn card_lookup() {
        let layout = BoardLayout {
            columns: vec![ColumnGeometry {
                status: TaskStatus::ToDo,
                bounds: Bounds::new(0, 0, 100, 300),
                cards: vec![
                    CardGeometry {
                        key: "1".into(),
                        bounds: Bounds::new(0, 10, 100, 40),
                    },
                    CardGeometry {
                        key: "2".into(),
                        bounds: Bounds::new(0, 60, 100, 40),
                    },
                ],
            }],
        };
        assert_eq!(layout.card_at(Point::new(5, 70)), Some("2"));
        assert_eq!(layout.card_at(Point::new(5, 55)), None);
        let (col, idx) = layout.locate("2").unwrap();
        assert_eq!((col.status, idx), (TaskStatus::ToDo, 1));
        assert!(layout.column(TaskStatus::Done).is_none());
    }
}
