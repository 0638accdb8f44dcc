//! Command-line interface for envaudit.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AuditArgs, Cli, CollectArgs, Commands, PolicyArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
