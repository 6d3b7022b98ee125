//! Presentation layer for refbox
//!
//! This crate contains CLI definitions, the console display adapter and
//! operator input parsing.

pub mod cli;
pub mod input;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use input::{HELP, OperatorCommand, parse_line};
pub use output::console::{ConsoleDisplay, ConsoleFormatter};
