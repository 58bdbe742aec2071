use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::ContactForm;
use crate::model::task::TaskStatus;
use crate::tui::app::{App, Mode, MoveState, PendingDelete, View};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if handle_global(app, key) {
        return;
    }
    match app.view {
        View::Board => handle_board(app, key),
        View::Contacts => handle_contacts(app, key),
        View::Summary => handle_summary(app, key),
        _ => {}
    }
}

/// Keys that work in every app view. Returns true if the key was consumed.
fn handle_global(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            app.switch_view(View::TABS[idx]);
        }
        KeyCode::Tab => cycle_tab(app, 1),
        KeyCode::BackTab => cycle_tab(app, View::TABS.len() - 1),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.reload();
            app.notify("Reloaded");
        }
        _ => return false,
    }
    true
}

fn cycle_tab(app: &mut App, step: usize) {
    let current = View::TABS.iter().position(|v| *v == app.view).unwrap_or(0);
    let next = View::TABS[(current + step) % View::TABS.len()];
    app.switch_view(next);
}

fn handle_summary(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('b') => app.switch_view(View::Board),
        KeyCode::Char('a') => app.open_add_task(TaskStatus::ToDo),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

fn handle_board(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => move_column(app, -1),
        KeyCode::Right | KeyCode::Char('l') => move_column(app, 1),
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor.row = app.cursor.row.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor.row += 1;
            app.clamp_cursor();
        }
        KeyCode::Char('g') => app.cursor.row = 0,
        KeyCode::Char('G') => {
            app.cursor.row = usize::MAX;
            app.clamp_cursor();
        }
        KeyCode::Enter => {
            if let Some(key) = app.cursor_key() {
                app.open_detail(&key);
            }
        }
        KeyCode::Char('/') => {
            app.search_input = app.filter.needle().to_string();
            app.mode = Mode::Search;
        }
        KeyCode::Esc => {
            app.search_input.clear();
            app.set_filter("");
        }
        KeyCode::Char('m') => enter_move_mode(app),
        KeyCode::Char('a') => {
            let status = app.cursor_status();
            app.open_add_task(status);
        }
        KeyCode::Char('e') => {
            if let Some(key) = app.cursor_key()
                && let Some(task) = app.board.task(&key)
            {
                app.edit_form = Some(crate::form::TaskForm::from_task(&key, task));
            }
        }
        KeyCode::Char('d') => {
            if let Some(key) = app.cursor_key() {
                app.pending_delete = Some(PendingDelete::Task(key));
            }
        }
        _ => {}
    }
}

fn move_column(app: &mut App, delta: isize) {
    let last = TaskStatus::ALL.len() as isize - 1;
    app.cursor.column = (app.cursor.column as isize + delta).clamp(0, last) as usize;
    app.clamp_cursor();
}

/// Live search: the filter updates with every keystroke
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Esc => {
            app.search_input.clear();
            app.set_filter("");
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            let query = app.search_input.clone();
            app.set_filter(&query);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
            let query = app.search_input.clone();
            app.set_filter(&query);
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Keyboard move
// ---------------------------------------------------------------------------

pub(super) fn enter_move_mode(app: &mut App) {
    let Some(key) = app.cursor_key() else {
        return;
    };
    let Some(task) = app.board.task(&key) else {
        return;
    };
    app.move_state = Some(MoveState {
        key,
        from: task.status,
        target: task.status,
    });
    app.mode = Mode::Move;
}

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let Some(state) = app.move_state.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            let idx = state.target.index().saturating_sub(1);
            state.target = TaskStatus::from_index(idx).unwrap_or(state.target);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let idx = state.target.index() + 1;
            state.target = TaskStatus::from_index(idx).unwrap_or(state.target);
        }
        KeyCode::Enter | KeyCode::Char('m') => {
            let MoveState { key, target, .. } = state.clone();
            app.move_state = None;
            app.mode = Mode::Navigate;
            app.apply_move(&key, target);
        }
        KeyCode::Esc => {
            app.move_state = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

fn handle_contacts(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.contact_cursor = app.contact_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.contact_cursor += 1;
            app.clamp_contact_cursor();
        }
        KeyCode::Char('n') | KeyCode::Char('a') => app.contact_form = Some(ContactForm::new()),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(key) = app.cursor_contact_key()
                && let Some(contact) = app.board.contact(&key)
            {
                app.contact_form = Some(ContactForm::from_contact(&key, contact));
            }
        }
        KeyCode::Char('d') => {
            if let Some(key) = app.cursor_contact_key() {
                app.pending_delete = Some(PendingDelete::Contact(key));
            }
        }
        _ => {}
    }
}
