//! Audit command implementation.
//!
//! `envaudit audit` loads the snapshot, runs every check, and writes the
//! combined report.

use std::path::PathBuf;
use tracing::debug;

use crate::audit::{Auditor, Domain, Status};
use crate::cli::args::AuditArgs;
use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::registry::NpmRegistryClient;
use crate::report::{write_report, HumanFormatter, ReportFormat, ReportFormatter};
use crate::runtime::resolve_runtime_version;
use crate::snapshot::load_snapshot;
use crate::ui::UserInterface;

use super::dispatcher::{load_config_or_report, Command, CommandContext, CommandResult};

/// Exit code when the snapshot file does not exist.
pub const EXIT_SNAPSHOT_MISSING: i32 = 2;

/// The audit command implementation.
pub struct AuditCommand {
    context: CommandContext,
    args: AuditArgs,
}

impl AuditCommand {
    /// Create a new audit command.
    pub fn new(context: CommandContext, args: AuditArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &AuditArgs {
        &self.args
    }

    fn snapshot_path(&self, config: &AuditConfig) -> PathBuf {
        self.args
            .snapshot
            .clone()
            .unwrap_or_else(|| self.context.project_path(&config.settings.snapshot_path))
    }

    fn report_path(&self, config: &AuditConfig) -> PathBuf {
        self.args
            .output
            .clone()
            .unwrap_or_else(|| self.context.project_path(&config.settings.report_path))
    }

    fn format(&self, config: &AuditConfig) -> ReportFormat {
        self.args.format.unwrap_or(config.settings.format)
    }

    fn registry_url<'a>(&'a self, config: &'a AuditConfig) -> &'a str {
        self.args
            .registry_url
            .as_deref()
            .unwrap_or(&config.settings.registry_url)
    }
}

impl Command for AuditCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_config_or_report(&self.context, ui)? else {
            return Ok(CommandResult::failure(1));
        };

        let snapshot_path = self.snapshot_path(&config);
        let snapshot = match load_snapshot(&snapshot_path) {
            Ok(snapshot) => snapshot,
            Err(e @ AuditError::SnapshotNotFound { .. }) => {
                ui.error(&e.to_string());
                ui.message("Run 'envaudit collect' to capture one.");
                return Ok(CommandResult::failure(EXIT_SNAPSHOT_MISSING));
            }
            Err(e @ AuditError::SnapshotParse { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let runtime_version = resolve_runtime_version(
            self.args.runtime_version.as_deref(),
            &config.settings.runtime_command,
        );
        debug!("Auditing with runtime version '{}'", runtime_version);

        let client = NpmRegistryClient::with_base_url(
            self.registry_url(&config),
            config.settings.lookup_timeout(),
        )?;
        let auditor = Auditor::new(config.effective_policy(), Box::new(client))
            .with_options(config.settings.lookup_options());

        ui.show_header("envaudit");
        let mut spinner = ui.start_spinner(&format!(
            "Checking {} dependencies",
            snapshot.dependencies.len()
        ));
        let report = auditor.audit(&snapshot, &runtime_version);
        spinner.finish_success(&format!("Audit complete: {} checks", report.total()));

        let format = self.format(&config);
        let report_path = self.report_path(&config);
        if let Err(e) = write_report(&report_path, &report, format) {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(1));
        }

        if ui.output_mode().shows_details() {
            if format == ReportFormat::Human {
                let mut rendered = Vec::new();
                HumanFormatter::new(self.context.use_color).format(&report, &mut rendered)?;
                ui.message(String::from_utf8_lossy(&rendered).trim_end());
            } else {
                for domain in Domain::ALL {
                    let findings = report.domain(domain);
                    ui.message(&format!(
                        "{}: {} checks, {} error(s)",
                        domain.title(),
                        findings.len(),
                        findings.count(Status::Error)
                    ));
                }
            }
        }

        ui.success(&format!("Report written to {}", report_path.display()));
        ui.message(&format!(
            "{} ok, {} update(s) available, {} error(s)",
            report.count(Status::Ok),
            report.count(Status::UpdateAvailable),
            report.count(Status::Error)
        ));

        if self.args.strict && report.has_errors() {
            ui.warning("Non-compliant findings present (--strict)");
            return Ok(CommandResult::failure(1));
        }

        Ok(CommandResult::success())
    }
}
