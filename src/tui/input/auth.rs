use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::{Field, LoginForm, SignupForm};
use crate::model::user::Session;
use crate::ops::user_ops::{self, AuthError};
use crate::tui::app::{App, View};

use super::edit_text;

pub(super) fn handle_login(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_form.focus_next()
        }
        KeyCode::Char('g') if ctrl => {
            tracing::info!("guest login");
            app.start_session(Session::guest());
        }
        KeyCode::Char('n') if ctrl => {
            app.signup_form = SignupForm::new();
            app.view = View::Signup;
        }
        KeyCode::Enter => submit_login(app),
        _ => {
            edit_text(app.login_form.focused_input_mut(), key);
        }
    }
}

fn submit_login(app: &mut App) {
    let Some((email, password)) = app.login_form.submit() else {
        return;
    };
    match user_ops::login(app.store.as_ref(), &app.local_users, &email, &password) {
        Ok(user) => app.start_session(Session::user(&user)),
        Err(AuthError::InvalidCredentials) => {
            app.login_form.password.clear();
            app.login_form.reject("Email or password is incorrect");
        }
        Err(e) => app.report("Logging in", &e),
    }
}

pub(super) fn handle_signup(app: &mut App, key: KeyEvent) {
    let form = &mut app.signup_form;
    match key.code {
        KeyCode::Esc => app.view = View::Login,
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => {
            let len = SignupForm::FIELDS.len();
            form.focus = (form.focus + len - 1) % len;
        }
        KeyCode::Char(' ') if form.focused_field() == Field::Privacy => {
            form.accept_privacy = !form.accept_privacy;
        }
        KeyCode::Enter => submit_signup(app),
        _ => {
            if let Some(input) = form.focused_input_mut() {
                edit_text(input, key);
            }
        }
    }
}

fn submit_signup(app: &mut App) {
    let Some(user) = app.signup_form.submit() else {
        return;
    };
    let email = user.email.clone();
    match user_ops::signup(&mut app.local_users, user) {
        Ok(()) => {
            app.signup_form = SignupForm::new();
            app.login_form = LoginForm::new();
            app.login_form.email.set(&email);
            app.login_form.focus = 1;
            app.view = View::Login;
            app.notify("You signed up successfully");
        }
        Err(AuthError::EmailTaken(_)) => app
            .signup_form
            .reject(Field::Email, "This email is already registered"),
        Err(e) => app.report("Signing up", &e),
    }
}
