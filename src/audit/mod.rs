//! Policy evaluation.
//!
//! This module turns a [`Snapshot`](crate::snapshot::Snapshot) into an
//! [`AuditReport`]:
//!
//! - [`env`] - Required and sensitive environment variables
//! - [`system`] - Platform facts and the minimum runtime version
//! - [`dependencies`] - Installed versions against the registry's latest
//! - [`auditor`] - Runs all three and merges their reports
//! - [`finding`] - Finding, DomainReport and AuditReport types
//!
//! The evaluators are plain functions over their inputs. Only the
//! dependency evaluator does I/O, through a
//! [`RegistryClient`](crate::registry::RegistryClient).

pub mod auditor;
pub mod dependencies;
pub mod env;
pub mod finding;
pub mod system;

pub use auditor::Auditor;
pub use dependencies::{evaluate_dependencies, LookupOptions};
pub use env::evaluate_env;
pub use finding::{AuditReport, Domain, DomainReport, Finding, Status};
pub use system::{evaluate_runtime_version, evaluate_system, RUNTIME_VERSION_KEY};
