use crossterm::event::{KeyCode, KeyEvent};

use crate::form::{SubtaskRef, TaskForm};
use crate::ops::contact_ops::{self, ContactError};
use crate::ops::task_ops::{self, TaskError};
use crate::tui::app::{App, PendingDelete};

use super::navigate::enter_move_mode;

/// Task detail overlay: subtask checkboxes, edit, delete, move
pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    let Some(state) = app.detail.clone() else {
        return;
    };
    let Some(task) = app.board.task(&state.key) else {
        app.detail = None;
        return;
    };
    let subtask_count = task.subtask_total();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.detail = None,
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(d) = app.detail.as_mut() {
                d.subtask_cursor = d.subtask_cursor.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(d) = app.detail.as_mut() {
                d.subtask_cursor = (d.subtask_cursor + 1).min(subtask_count.saturating_sub(1));
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_selected_subtask(app, &state.key),
        KeyCode::Char('e') => {
            app.edit_form = Some(TaskForm::from_task(&state.key, task));
            app.detail = None;
        }
        KeyCode::Char('d') => app.pending_delete = Some(PendingDelete::Task(state.key)),
        KeyCode::Char('m') => {
            app.detail = None;
            app.select_task(&state.key);
            enter_move_mode(app);
        }
        _ => {}
    }
}

fn toggle_selected_subtask(app: &mut App, key: &str) {
    let Some(cursor) = app.detail.as_ref().map(|d| d.subtask_cursor) else {
        return;
    };
    let Some(pending) = app.board.task(key).map(|t| t.subtasks.len()) else {
        return;
    };
    let item = if cursor < pending {
        SubtaskRef::Pending(cursor)
    } else {
        SubtaskRef::Done(cursor - pending)
    };
    match task_ops::toggle_subtask_at(app.store.as_ref(), &mut app.board, key, item) {
        Ok(_) => {}
        Err(TaskError::Store(e)) => app.report("Saving the subtask", &e),
        Err(e) => tracing::warn!(error = %e, "subtask toggle ignored"),
    }
}

/// y/Enter confirms the pending delete; anything else cancels it
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let Some(pending) = app.pending_delete.take() else {
        return;
    };
    if !matches!(key.code, KeyCode::Char('y') | KeyCode::Enter) {
        return;
    }
    match pending {
        PendingDelete::Task(key) => {
            match task_ops::delete_task(app.store.as_ref(), &mut app.board, &key) {
                Ok(task) => {
                    app.detail = None;
                    app.clamp_cursor();
                    app.notify(format!("Deleted \"{}\"", task.title));
                }
                Err(TaskError::NotFound(k)) => tracing::warn!(key = %k, "delete of unknown task"),
                Err(e) => app.report("Deleting the task", &e),
            }
        }
        PendingDelete::Contact(key) => {
            match contact_ops::delete_contact(app.store.as_ref(), &mut app.board, &key) {
                Ok(contact) => {
                    app.clamp_contact_cursor();
                    app.notify(format!("Deleted {}", contact.name));
                }
                Err(ContactError::NotFound(k)) => {
                    tracing::warn!(key = %k, "delete of unknown contact")
                }
                Err(e) => app.report("Deleting the contact", &e),
            }
        }
    }
}
