//! envaudit - Environment compliance auditing.
//!
//! envaudit reads a snapshot of a machine's environment variables, platform
//! facts, and installed npm dependencies, checks it against a compliance
//! policy, and writes one combined report grouped by domain.
//!
//! # Modules
//!
//! - [`audit`] - Rule evaluation and orchestration
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`policy`] - Compliance rules and priorities
//! - [`registry`] - Latest-version lookups against the package registry
//! - [`report`] - HTML, JSON, and terminal report rendering
//! - [`runtime`] - Runtime version probe
//! - [`snapshot`] - Snapshot format, loading, and collection
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use envaudit::audit::evaluate_env;
//! use envaudit::policy::Policy;
//! use indexmap::IndexMap;
//!
//! let mut vars = IndexMap::new();
//! vars.insert("NODE_ENV".to_string(), "production".to_string());
//!
//! let findings = evaluate_env(&vars, &Policy::default());
//! assert!(findings.get("NODE_ENV").unwrap().is_ok());
//! assert!(!findings.get("APP_KEY").unwrap().is_ok());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod policy;
pub mod registry;
pub mod report;
pub mod runtime;
pub mod snapshot;
pub mod ui;

pub use error::{AuditError, Result};
