pub mod auth_form;
pub mod contact_form;
pub mod field;
pub mod input;
pub mod subtasks;
pub mod task_form;

pub use auth_form::{LoginForm, SignupForm};
pub use contact_form::ContactForm;
pub use field::{Field, FieldError};
pub use input::TextInput;
pub use subtasks::{SubtaskEditor, SubtaskRef};
pub use task_form::{TaskForm, TaskFormFocus};
