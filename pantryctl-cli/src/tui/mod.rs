//! pantryctl TUI - purchase history with an assistant on the side
//!
//! - Left scratch pane (command line for `/add`, `/alt`, `/shop`, ...)
//! - Purchase history with freshness badges
//! - One result panel per assistant action, filled in as results arrive
//! - Normal/Edit mode switching (vim-style)

pub mod app;
pub mod commands;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
