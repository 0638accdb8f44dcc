//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! dispatched via [`CommandDispatcher`], which routes CLI subcommands to
//! their implementations.

pub mod audit;
pub mod collect;
pub mod dispatcher;
pub mod policy;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
