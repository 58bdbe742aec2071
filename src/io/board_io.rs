use serde::de::DeserializeOwned;
use serde_json::Value;

use super::store::{DocumentStore, StoreError};
use crate::model::board::Board;
use crate::model::contact::Contact;
use crate::model::task::Task;

/// Counter document stored next to the task records
pub const TASK_COUNTER_KEY: &str = "lastTaskId";
/// Counter document stored next to the contact records
pub const CONTACT_COUNTER_KEY: &str = "lastContactId";

pub fn task_path(key: &str) -> String {
    format!("tasks/{key}")
}

pub fn contact_path(key: &str) -> String {
    format!("contacts/{key}")
}

pub fn task_counter_path() -> String {
    format!("tasks/{TASK_COUNTER_KEY}")
}

pub fn contact_counter_path() -> String {
    format!("contacts/{CONTACT_COUNTER_KEY}")
}

/// Load tasks and contacts wholesale.
pub fn load_board(store: &dyn DocumentStore) -> Result<Board, StoreError> {
    let mut board = Board::new();

    let tasks = store.get("tasks")?;
    let (task_records, last_task_id) = parse_collection::<Task>(&tasks, TASK_COUNTER_KEY);
    for (key, task) in task_records {
        board.insert_task(key, task);
    }
    board.last_task_id = last_task_id.unwrap_or(0);

    let contacts = store.get("contacts")?;
    let (contact_records, last_contact_id) =
        parse_collection::<Contact>(&contacts, CONTACT_COUNTER_KEY);
    for (key, contact) in contact_records {
        board.contacts.insert(key, contact);
    }
    board.sort_contacts();
    board.last_contact_id = last_contact_id.unwrap_or(0);

    tracing::info!(
        tasks = board.tasks.len(),
        contacts = board.contacts.len(),
        "board loaded"
    );
    Ok(board)
}

/// Reload only the task collection, keeping contacts as they are
pub fn reload_tasks(store: &dyn DocumentStore, board: &mut Board) -> Result<(), StoreError> {
    let tasks = store.get("tasks")?;
    let (records, counter) = parse_collection::<Task>(&tasks, TASK_COUNTER_KEY);
    board.tasks.clear();
    for (key, task) in records {
        board.insert_task(key, task);
    }
    board.last_task_id = counter.unwrap_or(0);
    Ok(())
}

/// Split a collection document into records and its counter.
///
/// Accepts an object keyed by id or an array with `null` holes (how the
/// store returns sequential numeric keys). Records that fail to decode are
/// skipped with a warning; the result is ordered by numeric key.
pub fn parse_collection<T: DeserializeOwned>(
    value: &Value,
    counter_key: &str,
) -> (Vec<(String, T)>, Option<u64>) {
    let mut counter = None;
    let entries: Vec<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(kind = %value_kind(other), "collection is not an object or array");
            Vec::new()
        }
    };

    let mut records = Vec::new();
    for (key, raw) in entries {
        if key == counter_key {
            counter = raw.as_u64();
            continue;
        }
        if raw.is_null() {
            continue;
        }
        match serde_json::from_value::<T>(raw.clone()) {
            Ok(record) => records.push((key, record)),
            Err(e) => tracing::warn!(%key, error = %e, "skipping malformed record"),
        }
    }
    records.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    (records, counter)
}

fn compare_keys(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
