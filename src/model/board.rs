use indexmap::IndexMap;

use super::contact::{CONTACT_PALETTE_SIZE, Contact};
use super::task::{Task, TaskStatus, names_match};

/// All entities of one board, loaded wholesale from the store.
///
/// Tasks and contacts are keyed by their store document key (a sequential
/// number rendered as a string). Contacts additionally keep a parallel index
/// sorted by first name, which drives list order and badge colors.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub tasks: IndexMap<String, Task>,
    pub contacts: IndexMap<String, Contact>,
    /// Value of the `tasks/lastTaskId` counter document
    pub last_task_id: u64,
    /// Value of the `contacts/lastContactId` counter document
    pub last_contact_id: u64,
    contact_order: Vec<String>,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    // -- tasks --

    pub fn task(&self, key: &str) -> Option<&Task> {
        self.tasks.get(key)
    }

    pub fn task_mut(&mut self, key: &str) -> Option<&mut Task> {
        self.tasks.get_mut(key)
    }

    pub fn insert_task(&mut self, key: impl Into<String>, task: Task) {
        self.tasks.insert(key.into(), task);
    }

    /// Remove a task, keeping the order of the remaining ones
    pub fn remove_task(&mut self, key: &str) -> Option<Task> {
        self.tasks.shift_remove(key)
    }

    /// Tasks of one column, in collection order
    pub fn tasks_in(&self, status: TaskStatus) -> impl Iterator<Item = (&String, &Task)> {
        self.tasks.iter().filter(move |(_, t)| t.status == status)
    }

    /// Next id to hand out: one past the counter or the highest numeric key
    pub fn next_task_id(&self) -> u64 {
        next_id(self.last_task_id, self.tasks.keys())
    }

    // -- contacts --

    pub fn contact(&self, key: &str) -> Option<&Contact> {
        self.contacts.get(key)
    }

    pub fn insert_contact(&mut self, key: impl Into<String>, contact: Contact) {
        self.contacts.insert(key.into(), contact);
        self.sort_contacts();
    }

    pub fn remove_contact(&mut self, key: &str) -> Option<Contact> {
        let removed = self.contacts.shift_remove(key);
        if removed.is_some() {
            self.sort_contacts();
        }
        removed
    }

    /// Replace a contact's record in place
    pub fn replace_contact(&mut self, key: &str, contact: Contact) -> bool {
        match self.contacts.get_mut(key) {
            Some(slot) => {
                *slot = contact;
                self.sort_contacts();
                true
            }
            None => false,
        }
    }

    pub fn next_contact_id(&self) -> u64 {
        next_id(self.last_contact_id, self.contacts.keys())
    }

    /// Rebuild the sorted contact index (first name, then full name, then key)
    pub fn sort_contacts(&mut self) {
        let mut keys: Vec<String> = self.contacts.keys().cloned().collect();
        keys.sort_by(|a, b| {
            let ca = &self.contacts[a];
            let cb = &self.contacts[b];
            ca.first_name()
                .to_lowercase()
                .cmp(&cb.first_name().to_lowercase())
                .then_with(|| ca.name.to_lowercase().cmp(&cb.name.to_lowercase()))
                .then_with(|| numeric_key(a).cmp(&numeric_key(b)))
        });
        self.contact_order = keys;
    }

    /// Contacts sorted by first name
    pub fn sorted_contacts(&self) -> Vec<(&String, &Contact)> {
        self.contact_order
            .iter()
            .filter_map(|k| self.contacts.get_key_value(k))
            .collect()
    }

    /// Deterministic badge color slot for a contact
    pub fn contact_color_index(&self, key: &str) -> Option<usize> {
        self.contact_order
            .iter()
            .position(|k| k == key)
            .map(|pos| pos % CONTACT_PALETTE_SIZE)
    }

    /// Find a contact by name (case-insensitive, trimmed)
    pub fn find_contact_by_name(&self, name: &str) -> Option<(&String, &Contact)> {
        self.contacts.iter().find(|(_, c)| names_match(&c.name, name))
    }
}

fn numeric_key(key: &str) -> u64 {
    key.parse().unwrap_or(u64::MAX)
}

fn next_id<'a>(counter: u64, keys: impl Iterator<Item = &'a String>) -> u64 {
    let max_key = keys.filter_map(|k| k.parse::<u64>().ok()).max().unwrap_or(0);
    counter.max(max_key) + 1
}
