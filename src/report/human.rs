//! Human-readable output formatter.
//!
//! Formats audit reports for terminal display with optional color support.

use console::Style;
use std::io::Write;

use super::ReportFormatter;
use crate::audit::{AuditReport, Status};

/// Formats audit reports for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_style(&self, status: Status) -> Style {
        if !self.use_color {
            return Style::new();
        }
        match status {
            Status::Ok => Style::new().green(),
            Status::UpdateAvailable => Style::new().color256(208),
            Status::Error => Style::new().red().bold(),
        }
    }

    fn status_icon(status: Status) -> &'static str {
        match status {
            Status::Ok => "✓",
            Status::UpdateAvailable => "↑",
            Status::Error => "✗",
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &AuditReport, writer: &mut W) -> std::io::Result<()> {
        let title = if self.use_color {
            Style::new().bold()
        } else {
            Style::new()
        };

        for (domain, findings) in report.sections() {
            writeln!(writer, "{}", title.apply_to(domain.title()))?;
            if findings.is_empty() {
                writeln!(writer, "  (nothing to check)")?;
            }

            for (key, finding) in findings.iter() {
                let status = finding.status();
                let label = format!("{} {} [{}]", Self::status_icon(status), key, status);
                writeln!(
                    writer,
                    "  {} {}",
                    self.status_style(status).apply_to(label),
                    finding.message()
                )?;
                if let Some(priority) = finding.priority() {
                    writeln!(writer, "     priority: {}", priority)?;
                }
                if let Some(suggestion) = finding.suggestion() {
                    writeln!(writer, "     = help: {}", suggestion)?;
                }
            }
            writeln!(writer)?;
        }

        writeln!(
            writer,
            "{} checks: {} ok, {} update(s) available, {} error(s)",
            report.total(),
            report.count(Status::Ok),
            report.count(Status::UpdateAvailable),
            report.count(Status::Error)
        )
    }
}
