use super::input::TextInput;

/// A form field that can carry an inline validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    DueDate,
    Category,
    Name,
    Email,
    Phone,
    Password,
    Confirm,
    Privacy,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::DueDate => "Due date",
            Field::Category => "Category",
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Password => "Password",
            Field::Confirm => "Confirm password",
            Field::Privacy => "Privacy policy",
        }
    }
}

/// One inline error, shown under its field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

/// Presence check: push "This field is required" if `input` is blank
pub fn require(field: Field, input: &TextInput, errors: &mut Vec<FieldError>) {
    if input.is_blank() {
        errors.push(FieldError::new(field, "This field is required"));
    }
}

/// Presence check on a plain string value
pub fn require_str(field: Field, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "This field is required"));
    }
}

/// The error for `field`, if any
pub fn error_for(errors: &[FieldError], field: Field) -> Option<&str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}
