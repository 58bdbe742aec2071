use chrono::NaiveDate;

use crate::model::board::Board;
use crate::model::task::{Priority, TaskStatus};

use super::board::{Badge, badges_for};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeView {
    pub badge: Badge,
    /// Key of the contact with this name, if any
    pub contact_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskView {
    pub text: String,
    pub done: bool,
}

/// Everything the task detail overlay shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailView {
    pub key: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Due date as stored
    pub duedate: String,
    pub due: Option<NaiveDate>,
    pub assignees: Vec<AssigneeView>,
    /// Pending subtasks first, then done ones
    pub subtasks: Vec<SubtaskView>,
}

impl TaskDetailView {
    /// Due date formatted for display (`dd/mm/yyyy`), or the raw string
    pub fn due_label(&self) -> String {
        match self.due {
            Some(d) => d.format("%d/%m/%Y").to_string(),
            None => self.duedate.clone(),
        }
    }
}

pub fn task_detail(board: &Board, key: &str) -> Option<TaskDetailView> {
    let task = board.task(key)?;
    let assignees = badges_for(board, task)
        .into_iter()
        .map(|badge| AssigneeView {
            contact_key: board
                .find_contact_by_name(&badge.name)
                .map(|(k, _)| k.clone()),
            badge,
        })
        .collect();
    let subtasks = task
        .subtasks
        .iter()
        .map(|s| SubtaskView {
            text: s.clone(),
            done: false,
        })
        .chain(task.subtasks_done.iter().map(|s| SubtaskView {
            text: s.clone(),
            done: true,
        }))
        .collect();
    Some(TaskDetailView {
        key: key.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        category: task.category.clone(),
        priority: task.priority,
        status: task.status,
        duedate: task.duedate.clone(),
        due: task.due_date(),
        assignees,
        subtasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::contact::Contact;
    use crate::model::task::Task;

    #[test]
    fn resolves_assignees_and_orders_subtasks() {
        let mut board = Board::new();
        board.insert_contact("7", Contact::new("Anna Meier", "", ""));
        let mut task = Task::new("Plan", TaskStatus::AwaitFeedback);
        task.duedate = "2025-04-09".into();
        task.assigned = vec!["Anna Meier".into(), "Nobody".into()];
        task.subtasks = vec!["b".into()];
        task.subtasks_done = vec!["a".into()];
        board.insert_task("3", task);

        let view = task_detail(&board, "3").unwrap();
        assert_eq!(view.assignees[0].contact_key.as_deref(), Some("7"));
        assert_eq!(view.assignees[1].contact_key, None);
        assert_eq!(
            view.subtasks,
            vec![
                SubtaskView {
                    text: "b".into(),
                    done: false
                },
                SubtaskView {
                    text: "a".into(),
                    done: true
                },
            ]
        );
        assert_eq!(view.due_label(), "09/04/2025");
    }

    #[test]
    fn unparseable_due_date_shown_raw_and_missing_task_is_none() {
        let mut board = Board::new();
        let mut task = Task::new("Plan", TaskStatus::ToDo);
        task.duedate = "next week".into();
        board.insert_task("1", task);
        assert_eq!(task_detail(&board, "1").unwrap().due_label(), "next week");
        assert!(task_detail(&board, "2").is_none());
    }
}
