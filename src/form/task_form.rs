use crate::model::task::{CATEGORIES, Priority, Task, TaskStatus, names_match};

use super::field::{Field, FieldError, error_for, require, require_str};
use super::input::TextInput;
use super::subtasks::SubtaskEditor;

/// Focusable rows of the task form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFormFocus {
    Title,
    Description,
    Assigned,
    DueDate,
    Priority,
    Category,
    Subtasks,
}

impl TaskFormFocus {
    pub const ORDER: [TaskFormFocus; 7] = [
        TaskFormFocus::Title,
        TaskFormFocus::Description,
        TaskFormFocus::Assigned,
        TaskFormFocus::DueDate,
        TaskFormFocus::Priority,
        TaskFormFocus::Category,
        TaskFormFocus::Subtasks,
    ];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Add/edit task form state
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: TextInput,
    pub description: TextInput,
    pub duedate: TextInput,
    /// Empty until a category is picked
    pub category: String,
    pub priority: Priority,
    pub assigned: Vec<String>,
    pub subtasks: SubtaskEditor,
    /// Column the task is created in; kept on edit
    pub status: TaskStatus,
    pub focus: TaskFormFocus,
    /// Highlighted row in the assignee picker
    pub assignee_cursor: usize,
    /// Highlighted subtask (flat index, pending first)
    pub subtask_cursor: usize,
    /// Key of the task being edited, `None` when adding
    pub editing_key: Option<String>,
    errors: Vec<FieldError>,
}

impl TaskForm {
    /// Empty form creating a task in `status`, with medium priority
    pub fn new(status: TaskStatus) -> Self {
        TaskForm {
            title: TextInput::new(),
            description: TextInput::new(),
            duedate: TextInput::new(),
            category: String::new(),
            priority: Priority::Medium,
            assigned: Vec::new(),
            subtasks: SubtaskEditor::new(),
            status,
            focus: TaskFormFocus::Title,
            assignee_cursor: 0,
            subtask_cursor: 0,
            editing_key: None,
            errors: Vec::new(),
        }
    }

    /// Form pre-filled from an existing task
    pub fn from_task(key: &str, task: &Task) -> Self {
        TaskForm {
            title: TextInput::with_text(&task.title),
            description: TextInput::with_text(&task.description),
            duedate: TextInput::with_text(&task.duedate),
            category: task.category.clone(),
            priority: task.priority,
            assigned: task.assigned.clone(),
            subtasks: SubtaskEditor::from_lists(&task.subtasks, &task.subtasks_done),
            status: task.status,
            focus: TaskFormFocus::Title,
            assignee_cursor: 0,
            subtask_cursor: 0,
            editing_key: Some(key.to_string()),
            errors: Vec::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_key.is_some()
    }

    /// Select a priority; the three choices are mutually exclusive
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Step to the next offered category
    pub fn cycle_category(&mut self) {
        let next = match CATEGORIES.iter().position(|c| *c == self.category) {
            Some(i) => CATEGORIES[(i + 1) % CATEGORIES.len()],
            None => CATEGORIES[0],
        };
        self.category = next.to_string();
    }

    pub fn is_assigned(&self, name: &str) -> bool {
        self.assigned.iter().any(|a| names_match(a, name))
    }

    /// Assign or unassign a contact by name
    pub fn toggle_assignee(&mut self, name: &str) {
        if self.is_assigned(name) {
            self.assigned.retain(|a| !names_match(a, name));
        } else {
            self.assigned.push(name.trim().to_string());
        }
    }

    /// Presence-check the required fields and build the task.
    ///
    /// Only the form's error list changes; field contents are left as typed.
    pub fn validate(&self) -> Result<Task, Vec<FieldError>> {
        let mut errors = Vec::new();
        require(Field::Title, &self.title, &mut errors);
        require(Field::DueDate, &self.duedate, &mut errors);
        require_str(Field::Category, &self.category, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        let (subtasks, subtasks_done) = self.subtasks.clone().into_lists();
        Ok(Task {
            id: 0,
            title: self.title.value(),
            description: self.description.value(),
            duedate: self.duedate.value(),
            category: self.category.clone(),
            priority: self.priority,
            status: self.status,
            assigned: self.assigned.clone(),
            subtasks,
            subtasks_done,
        })
    }

    /// Validate, remembering the errors for inline display
    pub fn submit(&mut self) -> Option<Task> {
        match self.validate() {
            Ok(task) => {
                self.errors.clear();
                Some(task)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        error_for(&self.errors, field)
    }

    /// Reset to an empty form for the same column
    pub fn clear(&mut self) {
        *self = TaskForm::new(self.status);
    }
}
