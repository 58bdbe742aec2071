use serde_json::json;

use crate::io::board_io::{contact_counter_path, contact_path};
use crate::io::store::{DocumentStore, StoreError, fetch, store_record};
use crate::model::board::Board;
use crate::model::contact::Contact;

/// Error type for contact operations
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("contact not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create a contact under the next sequential id. Returns the new key.
pub fn add_contact(
    store: &dyn DocumentStore,
    board: &mut Board,
    contact: Contact,
) -> Result<String, ContactError> {
    let stored_counter: Option<u64> = fetch(store, &contact_counter_path())?;
    board.last_contact_id = board.last_contact_id.max(stored_counter.unwrap_or(0));
    let id = board.next_contact_id();
    let key = id.to_string();

    store_record(store, &contact_path(&key), &contact)?;
    store.put(&contact_counter_path(), &json!(id))?;

    tracing::info!(%key, name = %contact.name, "contact created");
    board.insert_contact(key.clone(), contact);
    board.last_contact_id = id;
    Ok(key)
}

/// Replace a contact's record.
///
/// Tasks referencing the old name keep it; assignment is by name only.
pub fn update_contact(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
    contact: Contact,
) -> Result<(), ContactError> {
    if board.contact(key).is_none() {
        return Err(ContactError::NotFound(key.to_string()));
    }
    store_record(store, &contact_path(key), &contact)?;
    board.replace_contact(key, contact);
    tracing::info!(%key, "contact updated");
    Ok(())
}

/// Delete a contact. Task assignments are left as they are.
pub fn delete_contact(
    store: &dyn DocumentStore,
    board: &mut Board,
    key: &str,
) -> Result<Contact, ContactError> {
    if board.contact(key).is_none() {
        return Err(ContactError::NotFound(key.to_string()));
    }
    store.delete(&contact_path(key))?;
    tracing::info!(%key, "contact deleted");
    board
        .remove_contact(key)
        .ok_or_else(|| ContactError::NotFound(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::board_io::load_board;
    use crate::io::store::MemoryStore;
    use crate::model::task::TaskStatus;

    fn seeded_store() -> MemoryStore {
        MemoryStore::with_root(json!({
            "contacts": {
                "lastContactId": 3,
                "1": {"name": "Zoe Adams", "email": "zoe@x.io", "phonenumber": "111"},
                "3": {"name": "Bob Stone", "email": "bob@x.io", "phonenumber": "333"}
            },
            "tasks": {
                "1": {
                    "id": 1, "title": "Review", "status": "to_do",
                    "assigned": ["Bob Stone"]
                }
            }
        }))
    }

    #[test]
    fn add_contact_takes_next_id_and_sorts_by_first_name() {
        let store = seeded_store();
        let mut board = load_board(&store).unwrap();

        let key = add_contact(
            &store,
            &mut board,
            Contact::new("Anna Meier", "anna@x.io", "222"),
        )
        .unwrap();

        assert_eq!(key, "4");
        assert_eq!(store.root()["contacts"]["lastContactId"], 4);
        assert_eq!(store.root()["contacts"]["4"]["name"], "Anna Meier");

        let reloaded = load_board(&store).unwrap();
        let names: Vec<&str> = reloaded
            .sorted_contacts()
            .iter()
            .map(|(_, c)| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Anna Meier", "Bob Stone", "Zoe Adams"]);
        assert_eq!(reloaded.contact_color_index("4"), Some(0));
    }

    #[test]
    fn renaming_a_contact_leaves_task_assignments_alone() {
        let store = seeded_store();
        let mut board = load_board(&store).unwrap();

        update_contact(
            &store,
            &mut board,
            "3",
            Contact::new("Robert Stone", "bob@x.io", "333"),
        )
        .unwrap();

        assert_eq!(board.contact("3").unwrap().name, "Robert Stone");
        assert_eq!(board.task("1").unwrap().assigned, vec!["Bob Stone"]);
        let reloaded = load_board(&store).unwrap();
        assert_eq!(reloaded.task("1").unwrap().assigned, vec!["Bob Stone"]);
        assert_eq!(reloaded.task("1").unwrap().status, TaskStatus::ToDo);
        assert!(reloaded.find_contact_by_name("Bob Stone").is_none());
    }

    #[test]
    fn delete_contact_keeps_assignments() {
        let store = seeded_store();
        let mut board = load_board(&store).unwrap();
        delete_contact(&store, &mut board, "3").unwrap();
        assert!(board.contact("3").is_none());
        assert!(store.root()["contacts"].get("3").is_none());
        assert_eq!(board.task("1").unwrap().assigned, vec!["Bob Stone"]);
    }

    #[test]
    fn missing_contact_is_not_found() {
        let store = seeded_store();
        let mut board = load_board(&store).unwrap();
        store.clear_calls();
        assert!(matches!(
            update_contact(&store, &mut board, "9", Contact::new("x", "", "")),
            Err(ContactError::NotFound(_))
        ));
        assert!(matches!(
            delete_contact(&store, &mut board, "9"),
            Err(ContactError::NotFound(_))
        ));
        assert!(store.calls().is_empty());
    }
}
