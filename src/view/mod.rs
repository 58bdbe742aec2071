//! Display models built from a [`Board`](crate::model::board::Board).
//!
//! These are plain data; the TUI maps them to widgets and the CLI to text or
//! JSON.

pub mod board;
pub mod contacts;
pub mod detail;
pub mod summary;
