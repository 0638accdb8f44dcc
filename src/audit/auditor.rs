//! Audit orchestration.

use std::path::Path;
use tracing::info;

use super::dependencies::{evaluate_dependencies, LookupOptions};
use super::env::evaluate_env;
use super::finding::{AuditReport, Status};
use super::system::evaluate_system;
use crate::error::Result;
use crate::policy::Policy;
use crate::registry::RegistryClient;
use crate::snapshot::{load_snapshot, Snapshot};

/// Runs the three rule domains over a snapshot and merges the results.
///
/// # Example
///
/// ```
/// use envaudit::audit::{Auditor, Status};
/// use envaudit::registry::{LookupError, RegistryClient};
/// use envaudit::snapshot::{Snapshot, SystemInfo};
///
/// struct Offline;
/// impl RegistryClient for Offline {
///     fn resolve_latest_version(&self, name: &str) -> Result<String, LookupError> {
///         Err(LookupError::Timeout { name: name.to_string() })
///     }
/// }
///
/// let snapshot = Snapshot {
///     system_info: SystemInfo::new("linux", "x64"),
///     ..Default::default()
/// };
///
/// let auditor = Auditor::new(Default::default(), Box::new(Offline));
/// let report = auditor.audit(&snapshot, "v20.11.0");
/// assert_eq!(report.system_info.get("platform").unwrap().status(), Status::Ok);
/// assert_eq!(report.env_variables.get("APP_KEY").unwrap().status(), Status::Error);
/// ```
pub struct Auditor {
    policy: Policy,
    client: Box<dyn RegistryClient>,
    options: LookupOptions,
}

impl Auditor {
    /// Create an auditor with default lookup options.
    pub fn new(policy: Policy, client: Box<dyn RegistryClient>) -> Self {
        Self {
            policy,
            client,
            options: LookupOptions::default(),
        }
    }

    /// Set lookup concurrency and retries.
    pub fn with_options(mut self, options: LookupOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the policy in use.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Audit a loaded snapshot. Never fails: per-item problems are findings.
    pub fn audit(&self, snapshot: &Snapshot, runtime_version: &str) -> AuditReport {
        let report = AuditReport {
            env_variables: evaluate_env(&snapshot.env_variables, &self.policy),
            system_info: evaluate_system(&snapshot.system_info, runtime_version, &self.policy),
            dependencies: evaluate_dependencies(
                &snapshot.dependencies,
                self.client.as_ref(),
                &self.options,
            ),
        };

        info!(
            "Audit complete: {} findings ({} ok, {} updates, {} errors)",
            report.total(),
            report.count(Status::Ok),
            report.count(Status::UpdateAvailable),
            report.count(Status::Error)
        );
        report
    }

    /// Load a snapshot from disk and audit it.
    ///
    /// A missing or malformed snapshot fails the run; no partial report is
    /// produced.
    pub fn audit_file(&self, snapshot_path: &Path, runtime_version: &str) -> Result<AuditReport> {
        let snapshot = load_snapshot(snapshot_path)?;
        Ok(self.audit(&snapshot, runtime_version))
    }
}
