//! Snapshot records.
//!
//! A [`Snapshot`] is the recorded state of an environment at collection
//! time: its environment variables, a few system facts, and the installed
//! version of each declared dependency. The auditor only ever sees a
//! snapshot; it never reads the live process environment.
//!
//! # Modules
//!
//! - [`collector`] - Builds a snapshot from the current process and project
//!
//! # Example
//!
//! ```
//! use envaudit::snapshot::Snapshot;
//!
//! let snapshot: Snapshot = serde_json::from_str(r#"{
//!     "envVariables": { "NODE_ENV": "production" },
//!     "systemInfo": { "platform": "linux", "cpuArch": "x64" },
//!     "dependencies": { "lodash": { "version": "4.17.21" } }
//! }"#).unwrap();
//!
//! assert_eq!(snapshot.system_info.fact("platform"), Some("linux"));
//! assert_eq!(
//!     snapshot.dependencies["lodash"].installed_version.as_deref(),
//!     Some("4.17.21")
//! );
//! ```

pub mod collector;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::{AuditError, Result};

pub use collector::{collect_snapshot, write_snapshot};

/// Default file name of the intermediate snapshot record.
pub const DEFAULT_SNAPSHOT_FILE: &str = "extracted_data.json";

/// Recorded environment state consumed by the auditor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Environment variables at collection time.
    pub env_variables: IndexMap<String, String>,

    /// Host and platform facts.
    pub system_info: SystemInfo,

    /// Declared dependencies, in the order they were listed.
    pub dependencies: IndexMap<String, InstalledDependency>,
}

/// Host and platform facts recorded by the collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// Operating system platform (`linux`, `darwin`, `win32`, ...).
    pub platform: String,

    /// CPU architecture (`x64`, `arm64`, ...).
    pub cpu_arch: String,

    /// Informational fields (hostname, collection time, memory, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl SystemInfo {
    /// Create system info with the two audited facts.
    pub fn new(platform: impl Into<String>, cpu_arch: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            cpu_arch: cpu_arch.into(),
            extra: IndexMap::new(),
        }
    }

    /// Look up a fact by its snapshot field name.
    ///
    /// Extra fields are only returned when they hold a string.
    pub fn fact(&self, name: &str) -> Option<&str> {
        match name {
            "platform" => Some(self.platform.as_str()),
            "cpuArch" => Some(self.cpu_arch.as_str()),
            other => self.extra.get(other).and_then(|v| v.as_str()),
        }
    }
}

/// A dependency entry in the snapshot.
///
/// Accepts both `installedVersion` and the `version` key written by
/// `npm list --json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledDependency {
    /// Installed version, absent when the package manager reports it missing.
    #[serde(default, alias = "version", skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
}

impl InstalledDependency {
    /// Create an entry for an installed version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            installed_version: Some(version.into()),
        }
    }
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(content: &str, source_path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AuditError::SnapshotParse {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Load a snapshot record from disk.
///
/// A missing file or malformed content is fatal for the whole run.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AuditError::SnapshotNotFound {
            path: path.to_path_buf(),
        },
        _ => AuditError::Io(e),
    })?;

    let snapshot = Snapshot::from_json(&content, path)?;
    debug!(
        "Loaded snapshot from {} ({} env vars, {} dependencies)",
        path.display(),
        snapshot.env_variables.len(),
        snapshot.dependencies.len()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "envVariables": { "NODE_ENV": "production", "APP_KEY": "expected_value" },
        "systemInfo": {
            "platform": "linux",
            "cpuArch": "x64",
            "totalMem": 16777216,
            "hostname": "build-01"
        },
        "dependencies": {
            "zod": { "version": "3.22.4" },
            "express": { "installedVersion": "4.18.2" },
            "lodash": { "version": "4.17.21", "resolved": "https://registry.npmjs.org/lodash" }
        }
    }"#;

    #[test]
    fn parses_sample_snapshot() {
        let snapshot = Snapshot::from_json(SAMPLE, Path::new("snap.json")).unwrap();

        assert_eq!(snapshot.env_variables.len(), 2);
        assert_eq!(snapshot.system_info.platform, "linux");
        assert_eq!(snapshot.system_info.cpu_arch, "x64");
        assert_eq!(
            snapshot.dependencies["express"].installed_version.as_deref(),
            Some("4.18.2")
        );
    }

    #[test]
    fn preserves_dependency_order() {
        let snapshot = Snapshot::from_json(SAMPLE, Path::new("snap.json")).unwrap();
        let names: Vec<&str> = snapshot.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zod", "express", "lodash"]);
    }

    #[test]
    fn keeps_extra_system_fields() {
        let snapshot = Snapshot::from_json(SAMPLE, Path::new("snap.json")).unwrap();
        assert_eq!(snapshot.system_info.fact("hostname"), Some("build-01"));
        // Non-string extras are kept but are not facts
        assert!(snapshot.system_info.extra.contains_key("totalMem"));
        assert_eq!(snapshot.system_info.fact("totalMem"), None);
        assert_eq!(snapshot.system_info.fact("kernel"), None);
    }

    #[test]
    fn missing_dependency_version_is_none() {
        let json = r#"{
            "envVariables": {},
            "systemInfo": { "platform": "linux", "cpuArch": "x64" },
            "dependencies": { "left-pad": { "missing": true } }
        }"#;
        let snapshot = Snapshot::from_json(json, Path::new("snap.json")).unwrap();
        assert!(snapshot.dependencies["left-pad"].installed_version.is_none());
    }

    #[test]
    fn rejects_missing_sections() {
        let json = r#"{ "envVariables": {} }"#;
        let err = Snapshot::from_json(json, Path::new("snap.json")).unwrap_err();
        assert!(matches!(err, AuditError::SnapshotParse { .. }));
    }

    #[test]
    fn rejects_non_json() {
        let err = Snapshot::from_json("not json at all", Path::new("snap.json")).unwrap_err();
        match err {
            AuditError::SnapshotParse { path, .. } => assert_eq!(path, Path::new("snap.json")),
            other => panic!("Expected SnapshotParse, got {:?}", other),
        }
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.json");
        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, AuditError::SnapshotNotFound { .. }));
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SNAPSHOT_FILE);
        fs::write(&path, SAMPLE).unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.dependencies.len(), 3);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut snapshot = Snapshot {
            system_info: SystemInfo::new("linux", "x64"),
            ..Default::default()
        };
        snapshot
            .dependencies
            .insert("lodash".to_string(), InstalledDependency::new("4.17.21"));

        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value["envVariables"].is_object());
        assert_eq!(value["systemInfo"]["cpuArch"], "x64");
        assert_eq!(
            value["dependencies"]["lodash"]["installedVersion"],
            "4.17.21"
        );
    }
}
