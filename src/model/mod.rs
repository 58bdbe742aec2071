pub mod board;
pub mod config;
pub mod contact;
pub mod task;
pub mod user;

pub use board::*;
pub use config::*;
pub use contact::*;
pub use task::*;
pub use user::*;
