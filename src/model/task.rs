use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Board lane a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    AwaitFeedback,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::AwaitFeedback,
        TaskStatus::Done,
    ];

    /// The identifier stored in the remote document (`to_do`, `in_progress`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "to_do",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::AwaitFeedback => "await_feedback",
            TaskStatus::Done => "done",
        }
    }

    /// Column heading
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::AwaitFeedback => "Await feedback",
            TaskStatus::Done => "Done",
        }
    }

    /// Column index on the board (0..4)
    pub fn index(self) -> usize {
        match self {
            TaskStatus::ToDo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::AwaitFeedback => 2,
            TaskStatus::Done => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<TaskStatus> {
        TaskStatus::ALL.get(index).copied()
    }

    /// Parse an identifier or a label. Case-insensitive; `-` and spaces count as `_`.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "to_do" | "todo" => Some(TaskStatus::ToDo),
            "in_progress" => Some(TaskStatus::InProgress),
            "await_feedback" => Some(TaskStatus::AwaitFeedback),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority, a mutually exclusive three-way choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "urgent", alias = "URGENT")]
    Urgent,
    #[default]
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Single-character marker used on compact cards
    pub fn symbol(self) -> &'static str {
        match self {
            Priority::Urgent => "\u{25B2}",
            Priority::Medium => "=",
            Priority::Low => "\u{25BC}",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Some(Priority::Urgent),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories offered by the add-task form
pub const CATEGORIES: [&str; 2] = ["Technical Task", "User Story"];

/// A task record as stored under `tasks/{key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Sequential id, mirrors the store key
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Due date as `YYYY-MM-DD`
    #[serde(default)]
    pub duedate: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    pub status: TaskStatus,
    /// Contact names; matched to contacts by name only
    #[serde(default)]
    pub assigned: Vec<String>,
    /// Pending subtasks
    #[serde(default)]
    pub subtasks: Vec<String>,
    /// Completed subtasks
    #[serde(default)]
    pub subtasks_done: Vec<String>,
}

impl Task {
    /// Create a task with only a title and status; everything else empty
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Task {
            id: 0,
            title: title.into(),
            description: String::new(),
            duedate: String::new(),
            category: String::new(),
            priority: Priority::default(),
            status,
            assigned: Vec::new(),
            subtasks: Vec::new(),
            subtasks_done: Vec::new(),
        }
    }

    /// Parsed due date, if the stored string is a valid `YYYY-MM-DD`
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.duedate.trim(), "%Y-%m-%d").ok()
    }

    /// Total number of subtasks (pending + done)
    pub fn subtask_total(&self) -> usize {
        self.subtasks.len() + self.subtasks_done.len()
    }

    /// Whether `name` appears in the assigned list (case-insensitive, trimmed)
    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.assigned.iter().any(|a| names_match(a, name))
    }
}

/// Name comparison used for contact ↔ task matching
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_json_identifiers() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn status_parse_accepts_labels_and_identifiers() {
        assert_eq!(TaskStatus::parse("to_do"), Some(TaskStatus::ToDo));
        assert_eq!(TaskStatus::parse("In progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("await-feedback"), Some(TaskStatus::AwaitFeedback));
        assert_eq!(TaskStatus::parse(" DONE "), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("blocked"), None);
    }

    #[test]
    fn status_index_matches_column_order() {
        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
            assert_eq!(TaskStatus::from_index(i), Some(*status));
        }
        assert_eq!(TaskStatus::from_index(4), None);
    }

    #[test]
    fn priority_accepts_lowercase_on_input() {
        let p: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(p, Priority::Urgent);
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"Low\"");
        assert_eq!(Priority::parse("MEDIUM"), Some(Priority::Medium));
        assert_eq!(Priority::parse("high"), None);
    }

    #[test]
    fn task_deserializes_with_missing_lists() {
        let json = r#"{
            "id": 3,
            "title": "Write docs",
            "description": "",
            "duedate": "2025-06-01",
            "category": "User Story",
            "priority": "Low",
            "status": "await_feedback"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.status, TaskStatus::AwaitFeedback);
        assert!(task.assigned.is_empty());
        assert!(task.subtasks.is_empty());
        assert!(task.subtasks_done.is_empty());
    }

    #[test]
    fn task_serializes_subtasks_done_in_camel_case() {
        let mut task = Task::new("A", TaskStatus::ToDo);
        task.subtasks_done.push("x".into());
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["subtasksDone"][0], "x");
        assert_eq!(value["status"], "to_do");
        assert_eq!(value["priority"], "Medium");
    }

    #[test]
    fn due_date_parses_iso_dates_only() {
        let mut task = Task::new("A", TaskStatus::ToDo);
        task.duedate = "2025-02-28".into();
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2025, 2, 28));
        task.duedate = "28.02.2025".into();
        assert_eq!(task.due_date(), None);
    }

    #[test]
    fn assignee_match_ignores_case_and_whitespace() {
        let mut task = Task::new("A", TaskStatus::ToDo);
        task.assigned.push(" Anna Meier".into());
        assert!(task.is_assigned_to("anna meier "));
        assert!(!task.is_assigned_to("Anna"));
    }
}
