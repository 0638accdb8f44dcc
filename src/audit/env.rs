//! Environment-variable rules.

use indexmap::IndexMap;

use super::finding::{DomainReport, Finding};
use crate::policy::{Policy, Priority};

/// Shown in place of a missing or empty value.
pub(crate) const UNDEFINED: &str = "undefined";

/// Evaluate environment variables against the policy.
///
/// Required variables are evaluated first, then sensitive ones. A name that
/// appears in both lists ends up with the sensitive-variable finding, in the
/// position of its required-variable entry.
pub fn evaluate_env(vars: &IndexMap<String, String>, policy: &Policy) -> DomainReport {
    let mut report = DomainReport::new();

    for rule in &policy.required_env {
        let actual = vars.get(&rule.key).map(String::as_str);
        let finding = if actual == Some(rule.expected_value.as_str()) {
            Finding::ok(format!("Variable {} is set correctly.", rule.key))
        } else {
            let found = actual.filter(|v| !v.is_empty()).unwrap_or(UNDEFINED);
            Finding::error(
                format!(
                    "Non-compliant: {} expected = {}, found = {}.",
                    rule.key, rule.expected_value, found
                ),
                rule.priority,
                format!(
                    "Set {} to '{}' in your environment variables.",
                    rule.key, rule.expected_value
                ),
            )
        };
        report.insert(rule.key.clone(), finding);
    }

    for key in &policy.sensitive_env {
        let exposed = vars.get(key).is_some_and(|v| !v.is_empty());
        let finding = if exposed {
            Finding::error(
                format!("Non-compliant: {} is exposed in the environment variables.", key),
                Priority::High,
                format!(
                    "Remove {} from the environment variables or move it to a secure secret store.",
                    key
                ),
            )
        } else {
            Finding::ok(format!("Sensitive variable {} is not exposed.", key))
        };
        report.insert(key.clone(), finding);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::finding::Status;
    use crate::policy::Rule;

    fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn matching_required_variable_is_ok() {
        let report = evaluate_env(&vars(&[("APP_KEY", "expected_value")]), &Policy::default());
        let finding = report.get("APP_KEY").unwrap();
        assert_eq!(finding.status(), Status::Ok);
        assert!(finding.priority().is_none());
        assert!(finding.suggestion().is_none());
    }

    #[test]
    fn absent_required_variable_is_error() {
        let report = evaluate_env(&vars(&[]), &Policy::default());
        let finding = report.get("APP_KEY").unwrap();
        assert_eq!(finding.status(), Status::Error);
        assert_eq!(finding.priority(), Some(Priority::High));
        assert!(finding.message().contains("APP_KEY"));
        assert!(finding.message().contains("expected_value"));
        assert!(finding.message().contains("undefined"));
        assert!(finding.suggestion().unwrap().contains("APP_KEY"));
    }

    #[test]
    fn mismatched_value_reports_actual() {
        let report = evaluate_env(&vars(&[("NODE_ENV", "development")]), &Policy::default());
        let finding = report.get("NODE_ENV").unwrap();
        assert_eq!(finding.status(), Status::Error);
        assert_eq!(finding.priority(), Some(Priority::Medium));
        assert!(finding.message().contains("found = development"));
    }

    #[test]
    fn comparison_is_exact() {
        let report = evaluate_env(&vars(&[("NODE_ENV", "Production ")]), &Policy::default());
        assert_eq!(report.get("NODE_ENV").unwrap().status(), Status::Error);
    }

    #[test]
    fn exposed_sensitive_variable_is_high_error() {
        let report = evaluate_env(&vars(&[("DB_PASSWORD", "secret")]), &Policy::default());
        let finding = report.get("DB_PASSWORD").unwrap();
        assert_eq!(finding.status(), Status::Error);
        assert_eq!(finding.priority(), Some(Priority::High));
        assert!(finding.suggestion().unwrap().contains("secret store"));
    }

    #[test]
    fn empty_sensitive_variable_is_not_exposed() {
        let report = evaluate_env(&vars(&[("API_SECRET", "")]), &Policy::default());
        assert!(report.get("API_SECRET").unwrap().is_ok());
    }

    #[test]
    fn every_policy_key_appears_once_in_order() {
        let report = evaluate_env(&vars(&[("UNRELATED", "x")]), &Policy::default());
        let keys: Vec<&str> = report.keys().collect();
        assert_eq!(
            keys,
            vec!["NODE_ENV", "APP_KEY", "CONFIG_PATH", "DB_PASSWORD", "API_SECRET"]
        );
        assert!(report.get("UNRELATED").is_none());
    }

    #[test]
    fn sensitive_group_wins_for_overlapping_key() {
        let policy = Policy {
            required_env: vec![
                Rule::new("TOKEN", "abc", Priority::Low),
                Rule::new("NODE_ENV", "production", Priority::Medium),
            ],
            sensitive_env: vec!["TOKEN".to_string()],
            ..Policy::default()
        };

        // Required check passes, but the sensitive check runs last.
        let report = evaluate_env(&vars(&[("TOKEN", "abc")]), &policy);
        let finding = report.get("TOKEN").unwrap();
        assert_eq!(finding.status(), Status::Error);
        assert_eq!(finding.priority(), Some(Priority::High));
        assert_eq!(report.len(), 2);
        assert_eq!(report.keys().next(), Some("TOKEN"));
    }
}
