//! Policy command implementation.
//!
//! `envaudit policy` prints the rules an audit would apply: the configured
//! policy when the config has one, otherwise the built-in default.

use crate::cli::args::PolicyArgs;
use crate::error::Result;
use crate::policy::Policy;
use crate::ui::UserInterface;

use super::dispatcher::{load_config_or_report, Command, CommandContext, CommandResult};

/// The policy command implementation.
pub struct PolicyCommand {
    context: CommandContext,
    args: PolicyArgs,
}

impl PolicyCommand {
    /// Create a new policy command.
    pub fn new(context: CommandContext, args: PolicyArgs) -> Self {
        Self { context, args }
    }

    fn show_human(&self, policy: &Policy, ui: &mut dyn UserInterface) {
        ui.show_header("Compliance policy");

        ui.message("Required environment variables:");
        for rule in &policy.required_env {
            ui.message(&format!(
                "  {} = {} ({})",
                rule.key, rule.expected_value, rule.priority
            ));
        }

        ui.message("Sensitive environment variables:");
        for key in &policy.sensitive_env {
            ui.message(&format!("  {}", key));
        }

        ui.message("System facts:");
        for rule in &policy.system {
            ui.message(&format!(
                "  {} = {} ({})",
                rule.key, rule.expected_value, rule.priority
            ));
        }

        ui.message(&format!(
            "Minimum runtime version: {}",
            policy.min_runtime_version
        ));
    }
}

impl Command for PolicyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_config_or_report(&self.context, ui)? else {
            return Ok(CommandResult::failure(1));
        };
        let policy = config.effective_policy();

        if self.args.json {
            let json = serde_json::to_string_pretty(&policy).map_err(anyhow::Error::from)?;
            ui.message(&json);
        } else {
            self.show_human(&policy, ui);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn shows_default_policy() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = PolicyCommand::new(CommandContext::new(temp.path()), PolicyArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("NODE_ENV = production (MEDIUM)"));
        assert!(ui.has_message("  DB_PASSWORD"));
        assert!(ui.has_message("Minimum runtime version: v14.0.0"));
    }

    #[test]
    fn json_uses_configured_policy() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".envaudit");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yml"),
            r#"
policy:
  required_env: []
  sensitive_env: [AWS_SECRET_ACCESS_KEY]
  system: []
  min_runtime_version: v20.0.0
"#,
        )
        .unwrap();

        let mut ui = MockUI::new();
        PolicyCommand::new(
            CommandContext::new(temp.path()),
            PolicyArgs { json: true },
        )
        .execute(&mut ui)
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(parsed["sensitive_env"][0], "AWS_SECRET_ACCESS_KEY");
        assert_eq!(parsed["min_runtime_version"], "v20.0.0");
    }
}
