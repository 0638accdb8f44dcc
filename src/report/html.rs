//! HTML report formatter.
//!
//! Produces a standalone page with one section per domain. Each finding is
//! a coloured block: green for OK, orange for an available update, red for
//! an error.

use std::io::Write;

use super::ReportFormatter;
use crate::audit::{AuditReport, Finding, Status};

const TITLE: &str = "Configuration and Dependency Audit Report";

const STYLE: &str = r#"    body { font-family: Arial, sans-serif; color: #333; background-color: #f9f9f9; }
    h1 { color: #4CAF50; text-align: center; }
    .section { margin-bottom: 20px; }
    .ok { color: green; font-weight: bold; }
    .update { color: orange; font-weight: bold; }
    .error { color: red; font-weight: bold; }
    .priority { font-style: italic; font-size: 0.9em; color: #555; }
    .section-title { font-size: 1.2em; color: #333; margin-bottom: 5px; border-bottom: 1px solid #ddd; padding-bottom: 5px; }
    .item { margin: 8px 0; padding: 10px; border-radius: 5px; }
    .ok-bg { background-color: #e6ffed; }
    .update-bg { background-color: #fff5e6; }
    .error-bg { background-color: #ffe6e6; }
"#;

/// Formats audit reports as an HTML document.
#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Create a new HTML formatter.
    pub fn new() -> Self {
        Self
    }

    fn status_class(status: Status) -> &'static str {
        match status {
            Status::Ok => "ok",
            Status::UpdateAvailable => "update",
            Status::Error => "error",
        }
    }

    fn write_item<W: Write>(writer: &mut W, key: &str, finding: &Finding) -> std::io::Result<()> {
        let class = Self::status_class(finding.status());
        writeln!(writer, "    <div class=\"item {}-bg\">", class)?;
        writeln!(
            writer,
            "      {} : <span class=\"{}\">{}</span> - {}",
            escape(key),
            class,
            finding.status(),
            escape(finding.message())
        )?;
        if let Some(priority) = finding.priority() {
            writeln!(writer, "      <div class=\"priority\">Priority: {}</div>", priority)?;
        }
        if let Some(suggestion) = finding.suggestion() {
            writeln!(
                writer,
                "      <br><em>Suggestion: {}</em>",
                escape(suggestion)
            )?;
        }
        writeln!(writer, "    </div>")
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format<W: Write>(&self, report: &AuditReport, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html>")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "  <meta charset=\"utf-8\">")?;
        writeln!(writer, "  <title>{}</title>", TITLE)?;
        write!(writer, "  <style>\n{}  </style>\n", STYLE)?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "  <h1>{}</h1>", TITLE)?;

        for (domain, findings) in report.sections() {
            writeln!(
                writer,
                "  <div class=\"section\" id=\"{}\">",
                domain.key()
            )?;
            writeln!(
                writer,
                "    <div class=\"section-title\">{}</div>",
                domain.title()
            )?;
            for (key, finding) in findings.iter() {
                Self::write_item(writer, key, finding)?;
            }
            writeln!(writer, "  </div>")?;
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")
    }
}

/// Escape text for use in HTML content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Priority;

    fn render(report: &AuditReport) -> String {
        let mut output = Vec::new();
        HtmlFormatter::new().format(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn sections_in_fixed_order() {
        let html = render(&AuditReport::default());
        let env = html.find("Environment Variables").unwrap();
        let system = html.find("System Information").unwrap();
        let deps = html.find("<div class=\"section-title\">Dependencies").unwrap();
        assert!(env < system && system < deps);
    }

    #[test]
    fn ok_finding_has_no_priority_line() {
        let mut report = AuditReport::default();
        report
            .env_variables
            .insert("NODE_ENV", Finding::ok("Variable NODE_ENV is set correctly."));
        let html = render(&report);

        assert!(html.contains("class=\"item ok-bg\""));
        assert!(html.contains("<span class=\"ok\">OK</span>"));
        assert!(!html.contains("Priority:"));
        assert!(!html.contains("Suggestion:"));
    }

    #[test]
    fn error_finding_shows_priority_and_suggestion() {
        let mut report = AuditReport::default();
        report.env_variables.insert(
            "DB_PASSWORD",
            Finding::error("exposed", Priority::High, "move it to a secret store"),
        );
        let html = render(&report);

        assert!(html.contains("class=\"item error-bg\""));
        assert!(html.contains("Priority: HIGH"));
        assert!(html.contains("Suggestion: move it to a secret store"));
    }

    #[test]
    fn update_finding_uses_update_class() {
        let mut report = AuditReport::default();
        report.dependencies.insert(
            "lodash",
            Finding::update_available("old", Priority::Medium, "npm install lodash@4.17.22"),
        );
        let html = render(&report);

        assert!(html.contains("<span class=\"update\">UPDATE_AVAILABLE</span>"));
        assert!(html.contains("lodash@4.17.22"));
    }

    #[test]
    fn findings_keep_report_order() {
        let mut report = AuditReport::default();
        report.dependencies.insert("zod", Finding::ok("z"));
        report.dependencies.insert("axios", Finding::ok("a"));
        let html = render(&report);

        assert!(html.find("zod :").unwrap() < html.find("axios :").unwrap());
    }

    #[test]
    fn escapes_markup_in_values() {
        let mut report = AuditReport::default();
        report.env_variables.insert(
            "NODE_ENV",
            Finding::error(
                "found = <script>alert('x')</script>",
                Priority::Medium,
                "fix & retry",
            ),
        );
        let html = render(&report);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("fix &amp; retry"));
    }

    #[test]
    fn page_has_report_title() {
        let html = render(&AuditReport::default());
        assert!(html.contains("<title>Configuration and Dependency Audit Report</title>"));
    }
}
