mod auth;
mod detail;
mod forms;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::TextInput;

use super::app::{App, Mode, View};

pub use mouse::handle_mouse;

/// Handle a key event in the current view and mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    app.notice = None;

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    if app.pending_delete.is_some() {
        detail::handle_confirm(app, key);
        return;
    }

    match app.view {
        View::Login => auth::handle_login(app, key),
        View::Signup => auth::handle_signup(app, key),
        _ if app.edit_form.is_some() => forms::handle_task_form(app, key),
        _ if app.contact_form.is_some() => forms::handle_contact_form(app, key),
        _ if app.detail.is_some() => detail::handle_detail(app, key),
        View::AddTask => forms::handle_task_form(app, key),
        _ => match app.mode {
            Mode::Navigate => navigate::handle_navigate(app, key),
            Mode::Search => navigate::handle_search(app, key),
            Mode::Move => navigate::handle_move(app, key),
        },
    }
}

/// Handle a bracketed paste: inserted into whichever text input has focus
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(input) = focused_input(app) {
        input.insert_str(text);
    } else if app.mode == Mode::Search {
        app.search_input.push_str(&text.replace(['\n', '\r'], " "));
        let query = app.search_input.clone();
        app.set_filter(&query);
    }
}

/// The text input that currently receives typing, if any
fn focused_input(app: &mut App) -> Option<&mut TextInput> {
    match app.view {
        View::Login => Some(app.login_form.focused_input_mut()),
        View::Signup => app.signup_form.focused_input_mut(),
        _ if app.edit_form.is_some() => app.edit_form.as_mut().and_then(forms::task_form_input),
        _ if app.contact_form.is_some() => {
            app.contact_form.as_mut().map(|f| f.focused_input_mut())
        }
        View::AddTask => forms::task_form_input(&mut app.task_form),
        _ => None,
    }
}

/// Apply a line-editing key to `input`. Returns false for keys it does not handle.
pub(super) fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => input.home(),
        KeyCode::Char('e') if ctrl => input.end(),
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char(_) if ctrl => return false,
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => return false,
    }
    true
}
