//! Configuration schema definitions for envaudit.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::audit::LookupOptions;
use crate::error::{AuditError, Result};
use crate::policy::Policy;
use crate::registry::DEFAULT_REGISTRY_URL;
use crate::report::{ReportFormat, DEFAULT_REPORT_FILE};
use crate::runtime::DEFAULT_RUNTIME_COMMAND;
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;

/// Root configuration structure for `.envaudit/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Global settings
    pub settings: Settings,

    /// Replacement for the built-in compliance policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
}

/// Settings for collection, lookups, and report output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snapshot file (relative to project root)
    pub snapshot_path: PathBuf,

    /// Report destination (relative to project root)
    pub report_path: PathBuf,

    /// Report format: html, json, human
    pub format: ReportFormat,

    /// Base URL of the package registry
    pub registry_url: String,

    /// Maximum registry lookups in flight
    pub max_concurrent_lookups: usize,

    /// Per-lookup timeout in seconds
    pub lookup_timeout_secs: u64,

    /// Extra attempts after a connection failure or timeout
    pub lookup_retries: u32,

    /// Command printing the runtime version
    pub runtime_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            format: ReportFormat::default(),
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            max_concurrent_lookups: 8,
            lookup_timeout_secs: 10,
            lookup_retries: 0,
            runtime_command: DEFAULT_RUNTIME_COMMAND.to_string(),
        }
    }
}

impl Settings {
    /// Per-lookup timeout.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    /// Concurrency and retry options for the auditor.
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            max_concurrent: self.max_concurrent_lookups,
            retries: self.lookup_retries,
        }
    }
}

impl AuditConfig {
    /// The effective policy: the configured one or the built-in default.
    pub fn effective_policy(&self) -> Policy {
        self.policy.clone().unwrap_or_default()
    }

    /// Check settings ranges and the policy.
    pub fn validate(&self) -> Result<()> {
        let settings = &self.settings;

        if settings.max_concurrent_lookups == 0 {
            return Err(AuditError::ConfigValidationError {
                message: "max_concurrent_lookups must be at least 1".to_string(),
            });
        }
        if settings.lookup_timeout_secs == 0 {
            return Err(AuditError::ConfigValidationError {
                message: "lookup_timeout_secs must be at least 1".to_string(),
            });
        }
        if settings.registry_url.trim().is_empty() {
            return Err(AuditError::ConfigValidationError {
                message: "registry_url must not be empty".to_string(),
            });
        }

        if let Some(policy) = &self.policy {
            policy.validate()?;
        }
        Ok(())
    }
}
