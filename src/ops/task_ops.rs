use serde_json::json;

use crate::io::board_io::{task_counter_path, task_path};
use crate::io::store::{DocumentStore, StoreError, fetch, store_record};
use crate::form::SubtaskRef;
use crate::model::board::Board;
use crate::model::task::{Task, TaskStatus};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("subtask not found on task {key}: {text}")]
    SubtaskNotFound { key: String, text: String },
    #[error("no subtask at {item:?} on task {key}")]
    SubtaskOutOfRange { key: String, item: SubtaskRef },
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Create a task under the next sequential id. Returns the new key.
///
/// Reads the counter document, writes the record, then bumps the counter.
pub fn add_task(
    store: &dyn DocumentStore,
    board: &mut Board,
    mut task: Task,
) -> Result<String, TaskError> {
    let stored_counter: Option<u64> = fetch(store, &task_counter_path())?;
    board.last_task_id = board.last_task_id.max(stored_counter.unwrap_or(0));
    let id = board.next_task_id();
    let key = id.to_string();
    task.id = id;

    store_record(store, &task_path(&key), &task)?;
    store.put(&task_counter_path(), &json!(id))?;

    tracing::info!(%key, title = %task.title, "task created");
    board.insert_task(key.clone(), task);
    board.last_task_id = id;
    Ok(key)
}

/// Replace a task's record (edit overlay save)
pub fn update_task(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
    mut task: Task,
) -> Result<(), TaskError> {
    let existing = board
        .task(key)
        .ok_or_else(|| TaskError::NotFound(key.to_string()))?;
    task.id = existing.id;
    store_record(store, &task_path(key), &task)?;
    board.insert_task(key, task);
    tracing::info!(%key, "task updated");
    Ok(())
}

pub fn delete_task(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
) -> Result<Task, TaskError> {
    if board.task(key).is_none() {
        return Err(TaskError::NotFound(key.to_string()));
    }
    store.delete(&task_path(key))?;
    tracing::info!(%key, "task deleted");
    board
        .remove_task(key)
        .ok_or_else(|| TaskError::NotFound(key.to_string()))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Move a task to another column.
///
/// The in-memory board is updated first and stays updated if the store call
/// fails; exactly one partial update carrying the status is issued, even when
/// the status does not change.
pub fn move_task(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
    status: TaskStatus,
) -> Result<(), TaskError> {
    let task = board
        .task_mut(key)
        .ok_or_else(|| TaskError::NotFound(key.to_string()))?;
    let from = task.status;
    task.status = status;
    tracing::debug!(%key, %from, to = %status, "task moved");
    store.patch(&task_path(key), &json!({ "status": status }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Subtasks
// ---------------------------------------------------------------------------

fn patch_subtasks(store: &dyn DocumentStore, key: &str, task: &Task) -> Result<(), TaskError> {
    store.patch(
        &task_path(key),
        &json!({
            "subtasks": task.subtasks,
            "subtasksDone": task.subtasks_done,
        }),
    )?;
    Ok(())
}

/// Move a subtask between the pending and done lists, looked up by text.
/// The pending list is searched first. Returns true when the subtask is now done.
pub fn toggle_subtask(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
    text: &str,
) -> Result<bool, TaskError> {
    let task = board
        .task(key)
        .ok_or_else(|| TaskError::NotFound(key.to_string()))?;
    let item = if let Some(pos) = task.subtasks.iter().position(|s| s == text) {
        SubtaskRef::Pending(pos)
    } else if let Some(pos) = task.subtasks_done.iter().position(|s| s == text) {
        SubtaskRef::Done(pos)
    } else {
        return Err(TaskError::SubtaskNotFound {
            key: key.to_string(),
            text: text.to_string(),
        });
    };
    toggle_subtask_at(store, board, key, item)
}

/// Move the subtask at `item` to the other list.
/// Returns true when the subtask is now done.
pub fn toggle_subtask_at(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
    item: SubtaskRef,
) -> Result<bool, TaskError> {
    let task = board
        .task_mut(key)
        .ok_or_else(|| TaskError::NotFound(key.to_string()))?;
    let now_done = match item {
        SubtaskRef::Pending(i) if i < task.subtasks.len() => {
            let text = task.subtasks.remove(i);
            task.subtasks_done.push(text);
            true
        }
        SubtaskRef::Done(i) if i < task.subtasks_done.len() => {
            let text = task.subtasks_done.remove(i);
            task.subtasks.push(text);
            false
        }
        _ => {
            return Err(TaskError::SubtaskOutOfRange {
                key: key.to_string(),
                item,
            });
        }
    };
    let task = task.clone();
    patch_subtasks(store, key, &task)?;
    Ok(now_done)
}

/// Append a pending subtask. Blank text is ignored.
pub fn add_subtask(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
    text: &str,
) -> Result<(), TaskError> {
    let task = board
        .task_mut(key)
        .ok_or_else(|| TaskError::NotFound(key.to_string()))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    task.subtasks.push(text.to_string());
    let task = task.clone();
    patch_subtasks(store, key, &task)
}

/// Remove a subtask from whichever list holds it
pub fn remove_subtask(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
    text: &str,
) -> Result<(), TaskError> {
    let task = board
        .task_mut(key)
        .ok_or_else(|| TaskError::NotFound(key.to_string()))?;
    let before = task.subtask_total();
    task.subtasks.retain(|s| s != text);
    task.subtasks_done.retain(|s| s != text);
    if task.subtask_total() == before {
        return Err(TaskError::SubtaskNotFound {
            key: key.to_string(),
            text: text.to_string(),
        });
    }
    let task = task.clone();
    patch_subtasks(store, key, &task)
}
