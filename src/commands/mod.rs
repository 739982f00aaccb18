pub mod chat;
pub mod config;
pub mod delete;
pub mod list;
pub mod send;
pub mod upload;
pub mod watch;
