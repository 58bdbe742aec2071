use crate::model::contact::Contact;

use super::field::{Field, FieldError, error_for, require};
use super::input::TextInput;

/// Add/edit contact overlay
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: TextInput,
    pub email: TextInput,
    pub phone: TextInput,
    /// Index of the focused input (name, email, phone)
    pub focus: usize,
    pub editing_key: Option<String>,
    errors: Vec<FieldError>,
}

impl ContactForm {
    pub const FIELDS: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    pub fn new() -> Self {
        ContactForm::default()
    }

    pub fn from_contact(key: &str, contact: &Contact) -> Self {
        ContactForm {
            name: TextInput::with_text(&contact.name),
            email: TextInput::with_text(&contact.email),
            phone: TextInput::with_text(&contact.phonenumber),
            focus: 0,
            editing_key: Some(key.to_string()),
            errors: Vec::new(),
        }
    }

    pub fn focused_field(&self) -> Field {
        Self::FIELDS[self.focus % Self::FIELDS.len()]
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused_field() {
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            _ => &mut self.name,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Self::FIELDS.len() - 1) % Self::FIELDS.len();
    }

    pub fn validate(&self) -> Result<Contact, Vec<FieldError>> {
        let mut errors = Vec::new();
        require(Field::Name, &self.name, &mut errors);
        require(Field::Email, &self.email, &mut errors);
        require(Field::Phone, &self.phone, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Contact::new(
            self.name.value(),
            self.email.value(),
            self.phone.value(),
        ))
    }

    pub fn submit(&mut self) -> Option<Contact> {
        match self.validate() {
            Ok(contact) => {
                self.errors.clear();
                Some(contact)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        error_for(&self.errors, field)
    }
}
