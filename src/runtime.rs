//! Runtime version probe.
//!
//! The runtime version is ambient state read at audit time, not part of the
//! snapshot. It is resolved once by the command layer and passed to the
//! auditor as a plain string.

use std::process::Command;
use tracing::{debug, warn};

/// Command used to ask the runtime for its version.
pub const DEFAULT_RUNTIME_COMMAND: &str = "node --version";

/// Run a version command such as `node --version` and return its trimmed
/// stdout.
///
/// Returns `None` when the command is empty, cannot be started, exits with
/// a failure, or prints nothing.
pub fn probe_runtime_version(command: &str) -> Option<String> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    let args: Vec<&str> = parts.collect();

    let output = match Command::new(program).args(&args).output() {
        Ok(output) => output,
        Err(e) => {
            warn!("Could not run '{}': {}", command, e);
            return None;
        }
    };

    if !output.status.success() {
        warn!("'{}' exited with {}", command, output.status);
        return None;
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!("Runtime version from '{}': {}", command, version);
    (!version.is_empty()).then_some(version)
}

/// Resolve the runtime version: an explicit value wins, otherwise the probe.
/// An unresolvable version is the empty string, which fails any minimum.
pub fn resolve_runtime_version(explicit: Option<&str>, command: &str) -> String {
    match explicit {
        Some(version) => version.trim().to_string(),
        None => probe_runtime_version(command).unwrap_or_default(),
    }
}
