//! Error types for envaudit operations.
//!
//! This module defines [`AuditError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Only fatal conditions become an `AuditError`: a missing or unreadable
//!   snapshot, a broken config file, a report that cannot be written
//! - Per-item problems (policy mismatches, failed registry lookups) are never
//!   errors here; they are recorded as findings in the report
//! - Use `anyhow::Error` (via `AuditError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envaudit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Snapshot file does not exist or cannot be read.
    #[error("Snapshot not found: {path}")]
    SnapshotNotFound { path: PathBuf },

    /// Snapshot file exists but is not a valid snapshot record.
    #[error("Failed to parse snapshot at {path}: {message}")]
    SnapshotParse { path: PathBuf, message: String },

    /// An explicitly requested config file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The rendered report could not be written.
    #[error("Failed to write report to {path}: {message}")]
    ReportWrite { path: PathBuf, message: String },

    /// The collector could not produce a snapshot.
    #[error("Snapshot collection failed: {message}")]
    CollectorFailed { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envaudit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_not_found_displays_path() {
        let err = AuditError::SnapshotNotFound {
            path: PathBuf::from("/data/extracted_data.json"),
        };
        assert!(err.to_string().contains("/data/extracted_data.json"));
    }

    #[test]
    fn snapshot_parse_displays_path_and_message() {
        let err = AuditError::SnapshotParse {
            path: PathBuf::from("snap.json"),
            message: "expected value at line 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("snap.json"));
        assert!(msg.contains("expected value at line 1"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = AuditError::ConfigNotFound {
            path: PathBuf::from("ci/envaudit.yml"),
        };
        assert_eq!(
            err.to_string(),
            "Configuration file not found: ci/envaudit.yml"
        );
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = AuditError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = AuditError::ConfigValidationError {
            message: "max_concurrent_lookups must be at least 1".into(),
        };
        assert!(err.to_string().contains("max_concurrent_lookups"));
    }

    #[test]
    fn report_write_displays_path_and_message() {
        let err = AuditError::ReportWrite {
            path: PathBuf::from("out/report.html"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/report.html"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn collector_failed_displays_message() {
        let err = AuditError::CollectorFailed {
            message: "cannot serialize".into(),
        };
        assert!(err.to_string().contains("cannot serialize"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: AuditError = io_err.into();
        assert!(matches!(err, AuditError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts_to_other() {
        let err: AuditError = anyhow::anyhow!("unexpected").into();
        assert!(matches!(err, AuditError::Other(_)));
        assert_eq!(err.to_string(), "unexpected");
    }
}
