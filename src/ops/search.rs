use regex::Regex;

use crate::model::board::Board;
use crate::model::task::{Task, TaskStatus};

/// Which field of a task matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Description,
    /// A pending subtask
    Subtask,
    /// A completed subtask
    SubtaskDone,
    Assigned,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Description => "description",
            MatchField::Subtask => "subtask",
            MatchField::SubtaskDone => "subtask (done)",
            MatchField::Assigned => "assigned",
        }
    }
}

/// A search hit for one task field
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub task_key: String,
    pub status: TaskStatus,
    pub field: MatchField,
    /// The text of the field that matched
    pub text: String,
}

/// A normalized, case-insensitive substring query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    needle: String,
}

impl Filter {
    pub fn new(query: &str) -> Self {
        Filter {
            needle: query.trim().to_lowercase(),
        }
    }

    /// An empty filter matches everything
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    fn hit(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    /// Fields of `task` that contain the query
    pub fn matching_fields(&self, task: &Task) -> Vec<(MatchField, String)> {
        let mut fields = Vec::new();
        if self.hit(&task.title) {
            fields.push((MatchField::Title, task.title.clone()));
        }
        if self.hit(&task.description) {
            fields.push((MatchField::Description, task.description.clone()));
        }
        for s in &task.subtasks {
            if self.hit(s) {
                fields.push((MatchField::Subtask, s.clone()));
            }
        }
        for s in &task.subtasks_done {
            if self.hit(s) {
                fields.push((MatchField::SubtaskDone, s.clone()));
            }
        }
        for name in &task.assigned {
            if self.hit(name) {
                fields.push((MatchField::Assigned, name.clone()));
            }
        }
        fields
    }

    /// Whether the task is visible under this filter
    pub fn matches(&self, task: &Task) -> bool {
        if self.is_empty() {
            return true;
        }
        self.hit(&task.title)
            || self.hit(&task.description)
            || task.subtasks.iter().any(|s| self.hit(s))
            || task.subtasks_done.iter().any(|s| self.hit(s))
            || task.assigned.iter().any(|a| self.hit(a))
    }

    /// Case-insensitive regex for highlighting matches in rendered text
    pub fn highlight_regex(&self) -> Option<Regex> {
        if self.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(&self.needle))).ok()
    }
}

/// Keys of the tasks in `status` that pass the filter, in board order
pub fn visible_keys<'a>(board: &'a Board, status: TaskStatus, filter: &Filter) -> Vec<&'a str> {
    board
        .tasks_in(status)
        .filter(|(_, t)| filter.matches(t))
        .map(|(k, _)| k.as_str())
        .collect()
}

/// Search all tasks; one hit per matching field
pub fn search_tasks(board: &Board, query: &str) -> Vec<SearchHit> {
    let filter = Filter::new(query);
    if filter.is_empty() {
        return Vec::new();
    }
    let mut hits = Vec::new();
    for (key, task) in &board.tasks {
        for (field, text) in filter.matching_fields(task) {
            hits.push(SearchHit {
                task_key: key.clone(),
                status: task.status,
                field,
                text,
            });
        }
    }
    hits
}
