//! Terminal front end: a ratatui table over the view service.

pub mod app;
pub mod events;
pub mod filter_editor;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod table;
pub mod terminal_guard;
pub mod theme;
