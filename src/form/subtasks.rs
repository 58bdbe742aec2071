use super::input::TextInput;

/// Position of a subtask in one of the two lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtaskRef {
    Pending(usize),
    Done(usize),
}

/// In-form editor for a task's pending and done subtask lists.
///
/// Items are edited in place: `begin_edit` loads an item into an input,
/// `commit_edit` writes it back (or removes it when the input is blank).
#[derive(Debug, Clone, Default)]
pub struct SubtaskEditor {
    pending: Vec<String>,
    done: Vec<String>,
    /// Input for a new pending item
    pub new_item: TextInput,
    editing: Option<(SubtaskRef, TextInput)>,
}

impl SubtaskEditor {
    pub fn new() -> Self {
        SubtaskEditor::default()
    }

    pub fn from_lists(pending: &[String], done: &[String]) -> Self {
        SubtaskEditor {
            pending: pending.to_vec(),
            done: done.to_vec(),
            ..SubtaskEditor::default()
        }
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn done(&self) -> &[String] {
        &self.done
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index (pending first, then done) to a list position
    pub fn at(&self, index: usize) -> Option<SubtaskRef> {
        if index < self.pending.len() {
            Some(SubtaskRef::Pending(index))
        } else if index < self.len() {
            Some(SubtaskRef::Done(index - self.pending.len()))
        } else {
            None
        }
    }

    pub fn text(&self, item: SubtaskRef) -> Option<&str> {
        match item {
            SubtaskRef::Pending(i) => self.pending.get(i),
            SubtaskRef::Done(i) => self.done.get(i),
        }
        .map(String::as_str)
    }

    /// Add the new-item input as a pending subtask. Blank input is ignored.
    pub fn add(&mut self) -> bool {
        let text = self.new_item.value();
        self.new_item.clear();
        if text.is_empty() {
            return false;
        }
        self.pending.push(text);
        true
    }

    pub fn editing(&self) -> Option<&(SubtaskRef, TextInput)> {
        self.editing.as_ref()
    }

    pub fn editing_input_mut(&mut self) -> Option<&mut TextInput> {
        self.editing.as_mut().map(|(_, input)| input)
    }

    /// Swap an item into input mode
    pub fn begin_edit(&mut self, item: SubtaskRef) -> bool {
        match self.text(item) {
            Some(text) => {
                self.editing = Some((item, TextInput::with_text(text)));
                true
            }
            None => false,
        }
    }

    /// Write the edit back; a blank input deletes the item
    pub fn commit_edit(&mut self) {
        let Some((item, input)) = self.editing.take() else {
            return;
        };
        let text = input.value();
        if text.is_empty() {
            self.delete(item);
            return;
        }
        if let Some(slot) = self.slot_mut(item) {
            *slot = text;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn delete(&mut self, item: SubtaskRef) -> Option<String> {
        if matches!(&self.editing, Some((e, _)) if *e == item) {
            self.editing = None;
        }
        match item {
            SubtaskRef::Pending(i) if i < self.pending.len() => Some(self.pending.remove(i)),
            SubtaskRef::Done(i) if i < self.done.len() => Some(self.done.remove(i)),
            _ => None,
        }
    }

    /// Move an item between the pending and done lists.
    /// Returns where it landed.
    pub fn toggle(&mut self, item: SubtaskRef) -> Option<SubtaskRef> {
        self.editing = None;
        match item {
            SubtaskRef::Pending(i) if i < self.pending.len() => {
                let text = self.pending.remove(i);
                self.done.push(text);
                Some(SubtaskRef::Done(self.done.len() - 1))
            }
            SubtaskRef::Done(i) if i < self.done.len() => {
                let text = self.done.remove(i);
                self.pending.push(text);
                Some(SubtaskRef::Pending(self.pending.len() - 1))
            }
            _ => None,
        }
    }

    /// The two lists, consumed
    pub fn into_lists(self) -> (Vec<String>, Vec<String>) {
        (self.pending, self.done)
    }

    fn slot_mut(&mut self, item: SubtaskRef) -> Option<&mut String> {
        match item {
            SubtaskRef::Pending(i) => self.pending.get_mut(i),
            SubtaskRef::Done(i) => self.done.get_mut(i),
        }
    }
}
