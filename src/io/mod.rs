pub mod board_io;
pub mod config_io;
pub mod document;
pub mod file_store;
pub mod http_store;
pub mod session;
pub mod store;
