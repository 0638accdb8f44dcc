//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{AuditArgs, Cli, Commands};
use crate::config::{load_config, AuditConfig};
use crate::error::{AuditError, Result};
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command runs: project root and optional config file.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root directory.
    pub project_root: PathBuf,
    /// Explicit config file from `--config`.
    pub config_override: Option<PathBuf>,
    /// Whether terminal output may use colors.
    pub use_color: bool,
}

impl CommandContext {
    /// Create a context for the given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_override: None,
            use_color: false,
        }
    }

    /// Load and validate the config for this context.
    pub fn load_config(&self) -> Result<AuditConfig> {
        load_config(&self.project_root, self.config_override.as_deref())
    }

    /// Resolve a config-relative path against the project root.
    pub fn project_path(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }
}

/// Load config, reporting parse and validation problems through the UI.
///
/// Returns `Ok(None)` when the problem has already been shown.
pub(crate) fn load_config_or_report(
    context: &CommandContext,
    ui: &mut dyn UserInterface,
) -> Result<Option<AuditConfig>> {
    match context.load_config() {
        Ok(config) => Ok(Some(config)),
        Err(e @ AuditError::ConfigParseError { .. })
        | Err(e @ AuditError::ConfigValidationError { .. })
        | Err(e @ AuditError::ConfigNotFound { .. }) => {
            ui.error(&e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            context: CommandContext::new(project_root),
        }
    }

    /// Use an explicit config file instead of discovery.
    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.context.config_override = config;
        self
    }

    /// Enable or disable colors in terminal reports.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.context.use_color = use_color;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Audit(args)) => {
                super::audit::AuditCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Collect(args)) => {
                super::collect::CollectCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Policy(args)) => {
                super::policy::PolicyCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            None => super::audit::AuditCommand::new(self.context.clone(), AuditArgs::from_env())
                .execute(ui),
        }
    }
}
