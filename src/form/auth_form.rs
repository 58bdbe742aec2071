use crate::model::user::User;

use super::field::{Field, FieldError, error_for, require};
use super::input::TextInput;

/// Email + password login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: TextInput,
    pub password: TextInput,
    pub focus: usize,
    errors: Vec<FieldError>,
}

impl LoginForm {
    pub const FIELDS: [Field; 2] = [Field::Email, Field::Password];

    pub fn new() -> Self {
        LoginForm::default()
    }

    pub fn focused_field(&self) -> Field {
        Self::FIELDS[self.focus % Self::FIELDS.len()]
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused_field() {
            Field::Password => &mut self.password,
            _ => &mut self.email,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS.len();
    }

    /// Presence check; returns the trimmed email and the raw password
    pub fn submit(&mut self) -> Option<(String, String)> {
        let mut errors = Vec::new();
        require(Field::Email, &self.email, &mut errors);
        require(Field::Password, &self.password, &mut errors);
        self.errors = errors;
        if !self.errors.is_empty() {
            return None;
        }
        Some((self.email.value(), self.password.as_str().to_string()))
    }

    /// Attach an error from the login attempt itself
    pub fn reject(&mut self, message: impl Into<String>) {
        self.errors = vec![FieldError::new(Field::Password, message)];
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        error_for(&self.errors, field)
    }
}

/// Signup form: name, email, password twice, and privacy consent
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub confirm: TextInput,
    pub accept_privacy: bool,
    pub focus: usize,
    errors: Vec<FieldError>,
}

impl SignupForm {
    pub const FIELDS: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::Confirm,
        Field::Privacy,
    ];

    pub fn new() -> Self {
        SignupForm::default()
    }

    pub fn focused_field(&self) -> Field {
        Self::FIELDS[self.focus % Self::FIELDS.len()]
    }

    /// The focused text input; `None` on the privacy checkbox
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused_field() {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::Confirm => Some(&mut self.confirm),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS.len();
    }

    pub fn validate(&self) -> Result<User, Vec<FieldError>> {
        let mut errors = Vec::new();
        require(Field::Name, &self.name, &mut errors);
        require(Field::Email, &self.email, &mut errors);
        require(Field::Password, &self.password, &mut errors);
        require(Field::Confirm, &self.confirm, &mut errors);
        if !self.confirm.is_blank() && self.password.as_str() != self.confirm.as_str() {
            errors.push(FieldError::new(Field::Confirm, "Passwords do not match"));
        }
        if !self.accept_privacy {
            errors.push(FieldError::new(
                Field::Privacy,
                "Please accept the privacy policy",
            ));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(User {
            name: self.name.value(),
            email: self.email.value(),
            password: self.password.as_str().to_string(),
        })
    }

    pub fn submit(&mut self) -> Option<User> {
        match self.validate() {
            Ok(user) => {
                self.errors.clear();
                Some(user)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn reject(&mut self, field: Field, message: impl Into<String>) {
        self.errors = vec![FieldError::new(field, message)];
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        error_for(&self.errors, field)
    }
}
