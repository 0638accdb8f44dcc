//! System-fact and runtime-version rules.

use super::env::UNDEFINED;
use super::finding::{DomainReport, Finding};
use crate::policy::{Policy, Priority};
use crate::snapshot::SystemInfo;

/// Report key of the runtime version check.
pub const RUNTIME_VERSION_KEY: &str = "Runtime Version";

/// Evaluate system facts and the runtime version against the policy.
///
/// `runtime_version` is supplied by the caller; this function never probes
/// the host.
pub fn evaluate_system(info: &SystemInfo, runtime_version: &str, policy: &Policy) -> DomainReport {
    let mut report = DomainReport::new();

    for rule in &policy.system {
        let actual = info.fact(&rule.key).unwrap_or("");
        let finding = if actual == rule.expected_value {
            Finding::ok(format!("{} is configured correctly: {}.", rule.key, actual))
        } else {
            let found = if actual.is_empty() { UNDEFINED } else { actual };
            Finding::error(
                format!(
                    "Non-compliant: {} expected = {}, found = {}.",
                    rule.key, rule.expected_value, found
                ),
                rule.priority,
                format!(
                    "Make sure your system runs on {} {}.",
                    rule.key, rule.expected_value
                ),
            )
        };
        report.insert(rule.key.clone(), finding);
    }

    report.insert(
        RUNTIME_VERSION_KEY,
        evaluate_runtime_version(runtime_version, &policy.min_runtime_version),
    );

    report
}

/// Check the runtime version against the minimum.
///
/// Versions are compared as plain strings, not per component: `"v9.0.0"`
/// counts as newer than `"v14.0.0"`.
pub fn evaluate_runtime_version(runtime_version: &str, min_version: &str) -> Finding {
    if meets_minimum(runtime_version, min_version) {
        Finding::ok(format!("Runtime version is compliant: {}.", runtime_version))
    } else {
        let found = if runtime_version.is_empty() {
            UNDEFINED
        } else {
            runtime_version
        };
        Finding::error(
            format!(
                "Non-compliant: minimum runtime version {}, found {}.",
                min_version, found
            ),
            Priority::Medium,
            format!("Upgrade the runtime to version {} or later.", min_version),
        )
    }
}

/// Lexicographic `>=` on the raw version strings.
pub fn meets_minimum(version: &str, min_version: &str) -> bool {
    version >= min_version
}
