//! Compliance policy.
//!
//! A [`Policy`] is static data: an ordered list of typed rules per domain.
//! Declaration order is the order findings appear in the report. The
//! built-in policy is used unless the project config replaces it.
//!
//! # Example
//!
//! ```
//! use envaudit::policy::{Policy, Priority};
//!
//! let policy = Policy::default();
//! let app_key = policy.required_env.iter().find(|r| r.key == "APP_KEY").unwrap();
//! assert_eq!(app_key.expected_value, "expected_value");
//! assert_eq!(app_key.priority, Priority::High);
//! assert!(policy.sensitive_env.contains(&"DB_PASSWORD".to_string()));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuditError, Result};

/// Severity of a non-compliant finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Priority {
    /// Upper-case label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exact-match rule: `key` must equal `expected_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Environment variable name or system fact name.
    pub key: String,
    /// Required value.
    pub expected_value: String,
    /// Priority of a mismatch.
    pub priority: Priority,
}

impl Rule {
    /// Create a rule.
    pub fn new(key: impl Into<String>, expected_value: impl Into<String>, priority: Priority) -> Self {
        Self {
            key: key.into(),
            expected_value: expected_value.into(),
            priority,
        }
    }
}

/// The complete compliance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Environment variables that must hold a specific value.
    pub required_env: Vec<Rule>,

    /// Environment variables that must not be present.
    pub sensitive_env: Vec<String>,

    /// System facts (`platform`, `cpuArch`) that must hold a specific value.
    pub system: Vec<Rule>,

    /// Minimum runtime version, compared as a plain string.
    pub min_runtime_version: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            required_env: vec![
                Rule::new("NODE_ENV", "production", Priority::Medium),
                Rule::new("APP_KEY", "expected_value", Priority::High),
                Rule::new("CONFIG_PATH", "/etc/config", Priority::Low),
            ],
            sensitive_env: vec!["DB_PASSWORD".to_string(), "API_SECRET".to_string()],
            system: vec![
                Rule::new("platform", "linux", Priority::Medium),
                Rule::new("cpuArch", "x64", Priority::Low),
            ],
            min_runtime_version: "v14.0.0".to_string(),
        }
    }
}

impl Policy {
    /// Check that every rule names a key and the runtime minimum is set.
    pub fn validate(&self) -> Result<()> {
        let empty_rule = self
            .required_env
            .iter()
            .chain(self.system.iter())
            .any(|r| r.key.trim().is_empty());
        if empty_rule {
            return Err(AuditError::ConfigValidationError {
                message: "policy rules must have a non-empty key".to_string(),
            });
        }

        if self.sensitive_env.iter().any(|k| k.trim().is_empty()) {
            return Err(AuditError::ConfigValidationError {
                message: "sensitive_env entries must be non-empty".to_string(),
            });
        }

        if self.min_runtime_version.trim().is_empty() {
            return Err(AuditError::ConfigValidationError {
                message: "min_runtime_version must be set".to_string(),
            });
        }

        Ok(())
    }
}
