//! Deep merge algorithm for YAML configuration values.
//!
//! Local overrides are layered on top of the project config.
//!
//! # Merge Rules
//!
//! - Objects are merged recursively
//! - Arrays are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Deep merge two YAML values.
///
/// Later values override earlier values at the point of conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        // An empty file parses to null and changes nothing
        (base, Value::Null) => base.clone(),

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple configs in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn nested_settings_merge_recursively() {
        let base = yaml(
            r#"
settings:
  format: html
  max_concurrent_lookups: 8
"#,
        );
        let overlay = yaml(
            r#"
settings:
  format: json
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["settings"]["format"], "json");
        assert_eq!(result["settings"]["max_concurrent_lookups"], 8);
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let base = yaml("policy:\n  sensitive_env: [DB_PASSWORD, API_SECRET]\n");
        let overlay = yaml("policy:\n  sensitive_env: [AWS_SECRET_ACCESS_KEY]\n");

        let result = deep_merge(&base, &overlay);
        let names = result["policy"]["sensitive_env"].as_sequence().unwrap();

        assert_eq!(names.len(), 1);
        assert_eq!(names[0], "AWS_SECRET_ACCESS_KEY");
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = yaml("settings:\n  registry_url: https://npm.internal\n  lookup_retries: 2\n");
        let overlay = yaml("settings:\n  registry_url: null\n");

        let result = deep_merge(&base, &overlay);

        assert!(result["settings"].get("registry_url").is_none());
        assert_eq!(result["settings"]["lookup_retries"], 2);
    }

    #[test]
    fn empty_overlay_file_keeps_base() {
        let base = yaml("settings:\n  format: json\n");
        let result = deep_merge(&base, &Value::Null);
        assert_eq!(result["settings"]["format"], "json");
    }

    #[test]
    fn merge_configs_merges_multiple_in_order() {
        let configs = vec![yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")];

        let result = merge_configs(&configs);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }
}
