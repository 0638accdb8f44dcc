//! Collect command implementation.
//!
//! `envaudit collect` captures the current environment into a snapshot file
//! that `envaudit audit` can evaluate later or on another machine.

use crate::cli::args::CollectArgs;
use crate::error::Result;
use crate::snapshot::{collect_snapshot, write_snapshot};
use crate::ui::UserInterface;

use super::dispatcher::{load_config_or_report, Command, CommandContext, CommandResult};

/// The collect command implementation.
pub struct CollectCommand {
    context: CommandContext,
    args: CollectArgs,
}

impl CollectCommand {
    /// Create a new collect command.
    pub fn new(context: CommandContext, args: CollectArgs) -> Self {
        Self { context, args }
    }
}

impl Command for CollectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_config_or_report(&self.context, ui)? else {
            return Ok(CommandResult::failure(1));
        };

        let output = self
            .args
            .output
            .clone()
            .unwrap_or_else(|| self.context.project_path(&config.settings.snapshot_path));

        let mut spinner = ui.start_spinner("Collecting environment snapshot");
        let snapshot = collect_snapshot(&self.context.project_root);
        if let Err(e) = write_snapshot(&output, &snapshot) {
            spinner.finish_error("Snapshot collection failed");
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(1));
        }
        spinner.finish_success("Snapshot collected");

        ui.success(&format!("Snapshot written to {}", output.display()));
        ui.message(&format!(
            "{} environment variables, {} dependencies",
            snapshot.env_variables.len(),
            snapshot.dependencies.len()
        ));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::load_snapshot;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn writes_loadable_snapshot() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("snap.json");
        let args = CollectArgs {
            output: Some(output.clone()),
        };

        let mut ui = MockUI::new();
        let result = CollectCommand::new(CommandContext::new(temp.path()), args)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let snapshot = load_snapshot(&output).unwrap();
        assert!(!snapshot.system_info.platform.is_empty());
        assert!(snapshot.system_info.extra.contains_key("collectedAt"));
    }

    #[test]
    fn defaults_to_project_snapshot_path() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        CollectCommand::new(CommandContext::new(temp.path()), CollectArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(temp.path().join("extracted_data.json").exists());
        assert!(ui.has_message("environment variables"));
    }
}
