use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::{ContactForm, SubtaskRef, TaskForm, TaskFormFocus, TextInput};
use crate::model::task::Priority;
use crate::ops::contact_ops;
use crate::ops::task_ops;
use crate::tui::app::{App, View};

use super::edit_text;

/// The text input typing goes to for the focused row of a task form
pub(super) fn task_form_input(form: &mut TaskForm) -> Option<&mut TextInput> {
    match form.focus {
        TaskFormFocus::Title => Some(&mut form.title),
        TaskFormFocus::Description => Some(&mut form.description),
        TaskFormFocus::DueDate => Some(&mut form.duedate),
        TaskFormFocus::Subtasks => {
            if form.subtasks.editing().is_some() {
                form.subtasks.editing_input_mut()
            } else {
                Some(&mut form.subtasks.new_item)
            }
        }
        _ => None,
    }
}

/// Which form a key goes to: the edit overlay, or the add-task view
fn active_form(app: &mut App) -> &mut TaskForm {
    match app.edit_form {
        Some(ref mut form) => form,
        None => &mut app.task_form,
    }
}

/// Add-task view and edit-task overlay share one key map
pub(super) fn handle_task_form(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let is_overlay = app.edit_form.is_some();

    match key.code {
        KeyCode::Char('s') if ctrl => {
            submit_task_form(app);
            return;
        }
        KeyCode::Char('l') if ctrl && !is_overlay => {
            app.task_form.clear();
            return;
        }
        KeyCode::Esc => {
            let form = active_form(app);
            if form.subtasks.editing().is_some() {
                form.subtasks.cancel_edit();
            } else if is_overlay {
                app.edit_form = None;
            } else {
                app.switch_view(View::Board);
            }
            return;
        }
        KeyCode::Tab => {
            let form = active_form(app);
            form.subtasks.cancel_edit();
            form.focus = form.focus.next();
            return;
        }
        KeyCode::BackTab => {
            let form = active_form(app);
            form.subtasks.cancel_edit();
            form.focus = form.focus.prev();
            return;
        }
        _ => {}
    }

    // Contact names for the assignee picker, in list order
    let names: Vec<String> = app
        .board
        .sorted_contacts()
        .iter()
        .map(|(_, c)| c.name.clone())
        .collect();
    let form = active_form(app);
    match form.focus {
        TaskFormFocus::Title | TaskFormFocus::Description | TaskFormFocus::DueDate => {
            if key.code == KeyCode::Enter {
                form.focus = form.focus.next();
            } else if let Some(input) = task_form_input(form) {
                edit_text(input, key);
            }
        }
        TaskFormFocus::Assigned => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                form.assignee_cursor = form.assignee_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                form.assignee_cursor =
                    (form.assignee_cursor + 1).min(names.len().saturating_sub(1));
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(name) = names.get(form.assignee_cursor) {
                    form.toggle_assignee(name);
                }
            }
            _ => {}
        },
        TaskFormFocus::Priority => {
            let current = Priority::ALL
                .iter()
                .position(|p| *p == form.priority)
                .unwrap_or(1);
            match key.code {
                KeyCode::Char('u') => form.set_priority(Priority::Urgent),
                KeyCode::Char('m') => form.set_priority(Priority::Medium),
                KeyCode::Char('l') => form.set_priority(Priority::Low),
                KeyCode::Left | KeyCode::Char('h') => {
                    form.set_priority(Priority::ALL[current.saturating_sub(1)]);
                }
                KeyCode::Right => {
                    form.set_priority(Priority::ALL[(current + 1).min(Priority::ALL.len() - 1)]);
                }
                _ => {}
            }
        }
        TaskFormFocus::Category => {
            if matches!(
                key.code,
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right
            ) {
                form.cycle_category();
            }
        }
        TaskFormFocus::Subtasks => handle_subtask_row(form, key),
    }
}

fn handle_subtask_row(form: &mut TaskForm, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let editor = &mut form.subtasks;

    if editor.editing().is_some() {
        if key.code == KeyCode::Enter {
            editor.commit_edit();
            form.subtask_cursor = form.subtask_cursor.min(editor.len().saturating_sub(1));
        } else if let Some(input) = editor.editing_input_mut() {
            edit_text(input, key);
        }
        return;
    }

    let selected = editor.at(form.subtask_cursor);
    match key.code {
        KeyCode::Enter => {
            editor.add();
        }
        KeyCode::Up => form.subtask_cursor = form.subtask_cursor.saturating_sub(1),
        KeyCode::Down => {
            form.subtask_cursor = (form.subtask_cursor + 1).min(editor.len().saturating_sub(1));
        }
        KeyCode::Char('e') if ctrl => {
            if let Some(item) = selected {
                editor.begin_edit(item);
            }
        }
        KeyCode::Char('d') if ctrl => {
            if let Some(item) = selected {
                editor.delete(item);
                form.subtask_cursor = form.subtask_cursor.min(editor.len().saturating_sub(1));
            }
        }
        KeyCode::Char('t') if ctrl => {
            if let Some(item) = selected
                && let Some(landed) = editor.toggle(item)
            {
                form.subtask_cursor = match landed {
                    SubtaskRef::Pending(i) => i,
                    SubtaskRef::Done(i) => editor.pending().len() + i,
                };
            }
        }
        _ => {
            edit_text(&mut editor.new_item, key);
        }
    }
}

fn submit_task_form(app: &mut App) {
    if let Some(form) = app.edit_form.as_mut() {
        let Some(task) = form.submit() else {
            return;
        };
        let Some(key) = form.editing_key.clone() else {
            return;
        };
        match task_ops::update_task(app.store.as_ref(), &mut app.board, &key, task) {
            Ok(()) => {
                app.edit_form = None;
                app.open_detail(&key);
                app.notify("Task saved");
            }
            Err(e) => app.report("Saving the task", &e),
        }
        return;
    }

    let Some(task) = app.task_form.submit() else {
        return;
    };
    match task_ops::add_task(app.store.as_ref(), &mut app.board, task) {
        Ok(key) => {
            app.task_form.clear();
            app.switch_view(View::Board);
            app.select_task(&key);
            app.flash = Some((key, std::time::Instant::now()));
            app.notify("Task added to board");
        }
        Err(e) => app.report("Adding the task", &e),
    }
}

/// Contact add/edit overlay
pub(super) fn handle_contact_form(app: &mut App, key: KeyEvent) {
    let Some(form) = app.contact_form.as_mut() else {
        return;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.contact_form = None,
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),
        KeyCode::Char('s') if ctrl => submit_contact_form(app),
        KeyCode::Enter => {
            if form.focus + 1 < ContactForm::FIELDS.len() {
                form.focus_next();
            } else {
                submit_contact_form(app);
            }
        }
        _ => {
            edit_text(form.focused_input_mut(), key);
        }
    }
}

fn submit_contact_form(app: &mut App) {
    let Some(form) = app.contact_form.as_mut() else {
        return;
    };
    let Some(contact) = form.submit() else {
        return;
    };
    let result = match form.editing_key.clone() {
        Some(key) => contact_ops::update_contact(app.store.as_ref(), &mut app.board, &key, contact)
            .map(|()| (key, "Contact saved")),
        None => contact_ops::add_contact(app.store.as_ref(), &mut app.board, contact)
            .map(|key| (key, "Contact successfully created")),
    };
    match result {
        Ok((key, message)) => {
            app.contact_form = None;
            app.select_contact(&key);
            app.notify(message);
        }
        Err(e) => app.report("Saving the contact", &e),
    }
}
