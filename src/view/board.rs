use crate::model::board::Board;
use crate::model::contact::initials_of;
use crate::model::task::{Priority, Task, TaskStatus};
use crate::ops::search::Filter;
use crate::util::text::truncate_to_width;

/// Longest description excerpt shown on a card, in cells
const EXCERPT_WIDTH: usize = 48;

/// An assignee's round badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub name: String,
    pub initials: String,
    /// Palette slot of the matching contact; `None` if no contact has this name
    pub color_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub priority: Priority,
    /// `(done, total)`; `None` when the task has no subtasks
    pub progress: Option<(usize, usize)>,
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub status: TaskStatus,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    /// Placeholder line for an empty column
    pub fn empty_text(&self) -> String {
        format!("No tasks {}", self.status.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn column(&self, status: TaskStatus) -> &ColumnView {
        &self.columns[status.index()]
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

/// Assignee badges for a task, colored by contact when the name matches
pub fn badges_for(board: &Board, task: &Task) -> Vec<Badge> {
    task.assigned
        .iter()
        .map(|name| {
            let color_index = board
                .find_contact_by_name(name)
                .and_then(|(key, _)| board.contact_color_index(key));
            Badge {
                name: name.clone(),
                initials: initials_of(name),
                color_index,
            }
        })
        .collect()
}

pub fn card_view(board: &Board, key: &str, task: &Task) -> CardView {
    let total = task.subtask_total();
    CardView {
        key: key.to_string(),
        title: task.title.clone(),
        excerpt: truncate_to_width(task.description.trim(), EXCERPT_WIDTH),
        category: task.category.clone(),
        priority: task.priority,
        progress: (total > 0).then_some((task.subtasks_done.len(), total)),
        badges: badges_for(board, task),
    }
}

/// Build the four columns in status order, applying `filter`
pub fn board_view(board: &Board, filter: &Filter) -> BoardView {
    let columns = TaskStatus::ALL
        .iter()
        .map(|&status| ColumnView {
            status,
            cards: board
                .tasks_in(status)
                .filter(|(_, t)| filter.matches(t))
                .map(|(k, t)| card_view(board, k, t))
                .collect(),
        })
        .collect();
    BoardView { columns }
}
