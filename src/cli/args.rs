//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::ReportFormat;

/// Environment variable that supplies `--registry-url`.
pub const REGISTRY_URL_ENV: &str = "ENVAUDIT_REGISTRY_URL";

/// envaudit - Environment compliance auditing.
#[derive(Debug, Parser)]
#[command(name = "envaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .envaudit/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Audit a snapshot and write the report (default if no command specified)
    Audit(AuditArgs),

    /// Capture a snapshot of the current environment
    Collect(CollectArgs),

    /// Show the effective compliance policy
    Policy(PolicyArgs),
}

/// Arguments for the `audit` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AuditArgs {
    /// Snapshot file to audit
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Where to write the report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Runtime version to check instead of probing the runtime
    #[arg(long)]
    pub runtime_version: Option<String>,

    /// Package registry base URL
    #[arg(long, env = REGISTRY_URL_ENV)]
    pub registry_url: Option<String>,

    /// Exit non-zero when any check reports an error
    #[arg(long)]
    pub strict: bool,
}

impl AuditArgs {
    /// Arguments for a bare `envaudit` run.
    ///
    /// Clap only reads environment fallbacks for a parsed `audit`
    /// subcommand, so they are applied here.
    pub fn from_env() -> Self {
        Self::default().with_registry_url_fallback(std::env::var(REGISTRY_URL_ENV).ok())
    }

    fn with_registry_url_fallback(mut self, url: Option<String>) -> Self {
        if self.registry_url.is_none() {
            self.registry_url = url.filter(|u| !u.is_empty());
        }
        self
    }
}

/// Arguments for the `collect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CollectArgs {
    /// Where to write the snapshot
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `policy` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PolicyArgs {
    /// Print the policy as JSON
    #[arg(long)]
    pub json: bool,
}
