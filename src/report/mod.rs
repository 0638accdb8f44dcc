//! Report rendering.
//!
//! This module provides formatters that turn an
//! [`AuditReport`](crate::audit::AuditReport) into an output document
//! (HTML, JSON, or plain terminal text). Every formatter lists every
//! finding, grouped by domain in the fixed order environment variables,
//! system information, dependencies.

pub mod html;
pub mod human;
pub mod json;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::audit::AuditReport;
use crate::error::{AuditError, Result};

pub use html::HtmlFormatter;
pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Default destination of the rendered report.
pub const DEFAULT_REPORT_FILE: &str = "combined_report.html";

/// Output format for audit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
    Human,
}

/// Trait for rendering audit reports.
pub trait ReportFormatter {
    /// Render the report to the given writer.
    fn format<W: Write>(&self, report: &AuditReport, writer: &mut W) -> std::io::Result<()>;
}

/// Render a report in the given format.
pub fn render(report: &AuditReport, format: ReportFormat) -> std::io::Result<Vec<u8>> {
    let mut output = Vec::new();
    match format {
        ReportFormat::Html => HtmlFormatter::new().format(report, &mut output)?,
        ReportFormat::Json => JsonFormatter::new().format(report, &mut output)?,
        ReportFormat::Human => HumanFormatter::new(false).format(report, &mut output)?,
    }
    Ok(output)
}

/// Render a report and write it to `path`.
pub fn write_report(path: &Path, report: &AuditReport, format: ReportFormat) -> Result<()> {
    let write_err = |message: String| AuditError::ReportWrite {
        path: path.to_path_buf(),
        message,
    };

    let content = render(report, format).map_err(|e| write_err(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    fs::write(path, content).map_err(|e| write_err(e.to_string()))?;

    info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Finding;
    use crate::policy::Priority;
    use tempfile::TempDir;

    fn sample_report() -> AuditReport {
        let mut report = AuditReport::default();
        report
            .env_variables
            .insert("APP_KEY", Finding::error("missing", Priority::High, "set it"));
        report.system_info.insert("platform", Finding::ok("linux"));
        report.dependencies.insert(
            "lodash",
            Finding::update_available("old", Priority::Medium, "npm install lodash@4.17.22"),
        );
        report
    }

    #[test]
    fn default_format_is_html() {
        assert_eq!(ReportFormat::default(), ReportFormat::Html);
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = sample_report();
        for format in [ReportFormat::Html, ReportFormat::Json, ReportFormat::Human] {
            let first = render(&report, format).unwrap();
            let second = render(&report, format).unwrap();
            assert_eq!(first, second, "{:?} output differs between runs", format);
        }
    }

    #[test]
    fn write_report_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reports").join(DEFAULT_REPORT_FILE);

        write_report(&path, &sample_report(), ReportFormat::Html).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("lodash"));
    }

    #[test]
    fn write_report_to_directory_fails() {
        let temp = TempDir::new().unwrap();
        let err = write_report(temp.path(), &sample_report(), ReportFormat::Json).unwrap_err();
        assert!(matches!(err, AuditError::ReportWrite { .. }));
    }
}
