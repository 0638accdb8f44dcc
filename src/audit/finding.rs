//! Findings and reports.
//!
//! A [`Finding`] is the evaluated result for one policy key. Findings for a
//! domain are collected into a [`DomainReport`], and the three domain
//! reports make up an [`AuditReport`].

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::policy::Priority;

/// Compliance status of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Compliant.
    Ok,
    /// Dependency is behind the latest published version.
    UpdateAvailable,
    /// Non-compliant or could not be evaluated.
    Error,
}

impl Status {
    /// Label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::UpdateAvailable => "UPDATE_AVAILABLE",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evaluated compliance result.
///
/// The constructors guarantee that an `OK` finding never carries a priority
/// or suggestion and that every other finding carries a priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    status: Status,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl Finding {
    /// A compliant finding.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            message: message.into(),
            priority: None,
            suggestion: None,
        }
    }

    /// A non-compliant finding with a remediation suggestion.
    pub fn error(
        message: impl Into<String>,
        priority: Priority,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            priority: Some(priority),
            suggestion: Some(suggestion.into()),
        }
    }

    /// An outdated dependency.
    pub fn update_available(
        message: impl Into<String>,
        priority: Priority,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            status: Status::UpdateAvailable,
            message: message.into(),
            priority: Some(priority),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

/// All findings for one audited domain, keyed and ordered by policy key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainReport {
    findings: IndexMap<String, Finding>,
}

impl DomainReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding.
    ///
    /// Re-inserting a key replaces its finding but keeps the key's original
    /// position.
    pub fn insert(&mut self, key: impl Into<String>, finding: Finding) {
        self.findings.insert(key.into(), finding);
    }

    /// Get the finding for a key.
    pub fn get(&self, key: &str) -> Option<&Finding> {
        self.findings.get(key)
    }

    /// Iterate findings in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Finding)> {
        self.findings.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Keys in report order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.findings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.findings
            .values()
            .filter(|f| f.status() == status)
            .count()
    }
}

impl FromIterator<(String, Finding)> for DomainReport {
    fn from_iter<I: IntoIterator<Item = (String, Finding)>>(iter: I) -> Self {
        Self {
            findings: iter.into_iter().collect(),
        }
    }
}

/// The audited domains, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    EnvVariables,
    SystemInfo,
    Dependencies,
}

impl Domain {
    /// All domains in their fixed report order.
    pub const ALL: [Domain; 3] = [Domain::EnvVariables, Domain::SystemInfo, Domain::Dependencies];

    /// Field name of the domain in snapshots and JSON reports.
    pub fn key(&self) -> &'static str {
        match self {
            Self::EnvVariables => "envVariables",
            Self::SystemInfo => "systemInfo",
            Self::Dependencies => "dependencies",
        }
    }

    /// Section title in rendered reports.
    pub fn title(&self) -> &'static str {
        match self {
            Self::EnvVariables => "Environment Variables",
            Self::SystemInfo => "System Information",
            Self::Dependencies => "Dependencies",
        }
    }
}

/// The full result of one audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub env_variables: DomainReport,
    pub system_info: DomainReport,
    pub dependencies: DomainReport,
}

impl AuditReport {
    /// Get the report for a domain.
    pub fn domain(&self, domain: Domain) -> &DomainReport {
        match domain {
            Domain::EnvVariables => &self.env_variables,
            Domain::SystemInfo => &self.system_info,
            Domain::Dependencies => &self.dependencies,
        }
    }

    /// Domains with their reports, in fixed report order.
    pub fn sections(&self) -> impl Iterator<Item = (Domain, &DomainReport)> {
        Domain::ALL.into_iter().map(move |d| (d, self.domain(d)))
    }

    /// Total number of findings with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.sections().map(|(_, r)| r.count(status)).sum()
    }

    /// Total number of findings.
    pub fn total(&self) -> usize {
        self.sections().map(|(_, r)| r.len()).sum()
    }

    /// Whether any finding is an error.
    pub fn has_errors(&self) -> bool {
        self.count(Status::Error) > 0
    }
}
