// Dashboard domain model

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::datasource::DatasourceSpec;
use super::plugin::Plugin;
use super::resource::Metadata;

// Matches `$name` interpolation tokens inside variable spec payloads.
static VARIABLE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([a-zA-Z_][a-zA-Z0-9_]*)").unwrap());

#[derive(Debug, Clone, Deserialize)]
pub struct Dashboard {
    pub metadata: Metadata,
    pub spec: DashboardSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSpec {
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(default)]
    pub datasources: Vec<DatasourceSpec>,
}

/// A named dashboard variable. Its body may interpolate other variables
/// with the `$name` syntax, which drives the evaluation order.
#[derive(Debug, Clone, Deserialize)]
pub struct Variable {
    pub kind: String,
    pub spec: VariableSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(flatten)]
    pub body: serde_json::Value,
}

impl Variable {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            spec: VariableSpec {
                name: name.into(),
                body,
            },
        }
    }

    /// Names of the variables this definition interpolates, derived from the
    /// spec body. Returned in lexical order so traversal stays deterministic.
    pub fn references(&self) -> BTreeSet<String> {
        let mut references = BTreeSet::new();
        collect_references(&self.spec.body, &mut references);
        references
    }
}

fn collect_references(value: &serde_json::Value, out: &mut BTreeSet<String>) {
    match value {
        serde_json::Value::String(text) => {
            for capture in VARIABLE_REFERENCE.captures_iter(text) {
                out.insert(capture[1].to_string());
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_references(item, out);
            }
        }
        serde_json::Value::Object(fields) => {
            for field in fields.values() {
                collect_references(field, out);
            }
        }
        _ => {}
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Panel {
    #[serde(default)]
    pub title: Option<String>,
    pub plugin: Plugin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_references_found_in_nested_payload() {
        let variable = Variable::new(
            "ListVariable",
            "instance",
            json!({
                "plugin": {
                    "kind": "PrometheusLabelValues",
                    "spec": {
                        "label_name": "instance",
                        "matchers": ["up{job=\"$job\", cluster=\"$cluster\"}"]
                    }
                }
            }),
        );
        let references: Vec<String> = variable.references().into_iter().collect();
        assert_eq!(references, vec!["cluster".to_string(), "job".to_string()]);
    }

    #[test]
    fn test_references_ignores_non_string_values() {
        let variable = Variable::new(
            "ListVariable",
            "pod",
            json!({ "limit": 100, "enabled": true, "query": "up" }),
        );
        assert!(variable.references().is_empty());
    }

    #[test]
    fn test_duplicate_references_deduplicated() {
        let variable = Variable::new(
            "ListVariable",
            "pod",
            json!({ "query": "rate(http_requests{ns=\"$namespace\"}[5m]) / $namespace" }),
        );
        assert_eq!(variable.references().len(), 1);
    }
}
