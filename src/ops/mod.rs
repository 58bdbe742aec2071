pub mod contact_ops;
pub mod search;
pub mod task_ops;
pub mod user_ops;
