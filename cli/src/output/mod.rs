//! CLI-specific output implementations
//!
//! Terminal rendering of the picture table, prompts standing in for modal
//! dialogs, and saving downloads to disk.

pub mod formatters;
pub mod terminal_view;

pub use terminal_view::{show_error, TerminalView, TerminalViewConfig};
