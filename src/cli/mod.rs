//! Interactive shell and one-shot command adapter around the budget view service.

pub mod commands;
pub mod core;
pub mod output;
pub mod shell;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
