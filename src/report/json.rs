//! JSON report formatter.
//!
//! Formats audit reports as machine-readable JSON for tooling integration.

use serde::Serialize;
use std::io::Write;

use super::ReportFormatter;
use crate::audit::{AuditReport, Status};

/// Formats audit reports as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a AuditReport,
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    total: usize,
    ok: usize,
    update_available: usize,
    errors: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &AuditReport, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            report,
            summary: JsonSummary {
                total: report.total(),
                ok: report.count(Status::Ok),
                update_available: report.count(Status::UpdateAvailable),
                errors: report.count(Status::Error),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
