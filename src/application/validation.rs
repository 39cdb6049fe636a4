// Dashboard and datasource validation use cases

use std::collections::HashSet;

use crate::application::schema_validator::SchemaValidator;
use crate::application::variable_order::build_variable_order;
use crate::domain::dashboard::Dashboard;
use crate::domain::datasource::DatasourceEntity;
use crate::domain::error::ValidationError;
use crate::domain::plugin::Plugin;
use crate::infrastructure::plugin_registry::PluginRegistry;

/// Validate a dashboard resource: variable ordering, schema checks when a
/// validator is configured, then the embedded datasources.
///
/// The pipeline is linear and fail-fast: the first violation is returned
/// unchanged and nothing after it runs.
pub fn validate_dashboard(
    dashboard: &Dashboard,
    registry: &PluginRegistry,
    schemas: Option<&dyn SchemaValidator>,
) -> Result<(), ValidationError> {
    let order = build_variable_order(&dashboard.spec.variables)?;
    tracing::debug!(
        "Resolved {} variables for dashboard {}",
        order.len(),
        dashboard.metadata.name
    );

    if let Some(schemas) = schemas {
        schemas.validate_dashboard_variables(&dashboard.spec.variables)?;
        schemas.validate_panels(&dashboard.spec.panels)?;
    }

    if !dashboard.spec.datasources.is_empty() {
        // Embedded specs are anonymous, so a duplicate default can only be
        // reported by its plugin kind.
        let mut default_kinds: HashSet<&str> = HashSet::new();
        for spec in &dashboard.spec.datasources {
            validate_datasource_plugin(&spec.plugin, registry, schemas)?;
            if spec.default && !default_kinds.insert(spec.plugin.kind.as_str()) {
                return Err(ValidationError::DuplicateDefault {
                    kind: spec.plugin.kind.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validate a top-level datasource against its siblings. The sibling list is
/// whatever comparison scope the caller owns, for example the other
/// datasources of the same project.
pub fn validate_datasource<T: DatasourceEntity>(
    entity: &T,
    siblings: &[T],
    registry: &PluginRegistry,
    schemas: Option<&dyn SchemaValidator>,
) -> Result<(), ValidationError> {
    validate_datasource_plugin(&entity.datasource_spec().plugin, registry, schemas)?;
    if !siblings.is_empty() {
        check_default_uniqueness(entity, siblings)?;
    }
    Ok(())
}

fn check_default_uniqueness<T: DatasourceEntity>(
    entity: &T,
    siblings: &[T],
) -> Result<(), ValidationError> {
    let spec = entity.datasource_spec();
    // A non-default entity cannot conflict with anything, whatever the
    // siblings declare.
    if !spec.default {
        return Ok(());
    }
    let kind = spec.plugin.kind.as_str();
    for sibling in siblings {
        let sibling_spec = sibling.datasource_spec();
        if sibling_spec.default && sibling_spec.plugin.kind == kind {
            return Err(ValidationError::DuplicateDefaultNamed {
                name: entity.name().to_string(),
                kind: kind.to_string(),
                existing: sibling.name().to_string(),
            });
        }
    }
    Ok(())
}

fn validate_datasource_plugin(
    plugin: &Plugin,
    registry: &PluginRegistry,
    schemas: Option<&dyn SchemaValidator>,
) -> Result<(), ValidationError> {
    registry.extract(plugin)?;
    if let Some(schemas) = schemas {
        schemas.validate_datasource(plugin)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{DashboardSpec, Panel, Variable};
    use crate::domain::datasource::{Datasource, DatasourceSpec};
    use crate::domain::resource::Metadata;
    use crate::infrastructure::plugin_registry::PluginSpecExtractor;
    use serde_json::json;
    use std::any::Any;
    use std::sync::Arc;

    struct PermissiveExtractor;

    impl PluginSpecExtractor for PermissiveExtractor {
        fn extract(
            &self,
            _kind: &str,
            spec: &serde_json::Value,
        ) -> Result<Box<dyn Any + Send>, ValidationError> {
            Ok(Box::new(spec.clone()))
        }
    }

    struct RejectingSchema;

    impl SchemaValidator for RejectingSchema {
        fn validate_dashboard_variables(
            &self,
            _variables: &[Variable],
        ) -> Result<(), ValidationError> {
            Err(ValidationError::SchemaViolation {
                reason: "variable rejected by schema".to_string(),
            })
        }

        fn validate_panels(&self, _panels: &[Panel]) -> Result<(), ValidationError> {
            Err(ValidationError::SchemaViolation {
                reason: "panel rejected by schema".to_string(),
            })
        }

        fn validate_datasource(&self, _plugin: &Plugin) -> Result<(), ValidationError> {
            Err(ValidationError::SchemaViolation {
                reason: "datasource rejected by schema".to_string(),
            })
        }
    }

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register("PrometheusDatasource", Arc::new(PermissiveExtractor));
        registry
    }

    fn embedded(kind: &str, default: bool) -> DatasourceSpec {
        DatasourceSpec {
            default,
            plugin: Plugin::new(kind, json!({})),
        }
    }

    fn dashboard(datasources: Vec<DatasourceSpec>) -> Dashboard {
        Dashboard {
            metadata: Metadata {
                name: "test".to_string(),
            },
            spec: DashboardSpec {
                variables: vec![],
                panels: vec![],
                datasources,
            },
        }
    }

    fn named_datasource(name: &str, kind: &str, default: bool) -> Datasource {
        Datasource {
            metadata: Metadata {
                name: name.to_string(),
            },
            spec: embedded(kind, default),
        }
    }

    #[test]
    fn test_dashboard_two_defaults_same_kind_rejected() {
        let dashboard = dashboard(vec![
            embedded("PrometheusDatasource", true),
            embedded("PrometheusDatasource", true),
        ]);
        let err = validate_dashboard(&dashboard, &registry(), None).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::DuplicateDefault { kind } if kind == "PrometheusDatasource"
        ));
    }

    #[test]
    fn test_dashboard_single_default_accepted() {
        let dashboard = dashboard(vec![
            embedded("PrometheusDatasource", true),
            embedded("PrometheusDatasource", false),
        ]);
        validate_dashboard(&dashboard, &registry(), None).unwrap();
    }

    #[test]
    fn test_dashboard_defaults_of_distinct_kinds_accepted() {
        let mut registry = registry();
        registry.register("TempoDatasource", Arc::new(PermissiveExtractor));
        let dashboard = dashboard(vec![
            embedded("PrometheusDatasource", true),
            embedded("TempoDatasource", true),
        ]);
        validate_dashboard(&dashboard, &registry, None).unwrap();
    }

    #[test]
    fn test_dashboard_variable_cycle_aborts_before_datasources() {
        let mut invalid = dashboard(vec![embedded("UnregisteredKind", true)]);
        invalid.spec.variables = vec![
            Variable::new("ListVariable", "a", json!({ "query": "q($b)" })),
            Variable::new("ListVariable", "b", json!({ "query": "q($a)" })),
        ];
        let err = validate_dashboard(&invalid, &registry(), None).unwrap_err();
        assert!(matches!(err, ValidationError::CyclicDependency { .. }));
    }

    #[test]
    fn test_dashboard_schema_rejection_propagated() {
        let dashboard = dashboard(vec![]);
        let err = validate_dashboard(&dashboard, &registry(), Some(&RejectingSchema)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::SchemaViolation { reason } if reason.contains("variable")
        ));
    }

    #[test]
    fn test_dashboard_without_schema_validator_skips_schema_checks() {
        // RejectingSchema would fail this dashboard; absence of the
        // capability must not.
        let dashboard = dashboard(vec![embedded("PrometheusDatasource", true)]);
        validate_dashboard(&dashboard, &registry(), None).unwrap();
    }

    #[test]
    fn test_dashboard_unsupported_embedded_kind_rejected() {
        let dashboard = dashboard(vec![embedded("MysteryDatasource", false)]);
        let err = validate_dashboard(&dashboard, &registry(), None).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnsupportedKind { kind } if kind == "MysteryDatasource"
        ));
    }

    #[test]
    fn test_datasource_default_conflict_names_both_parties() {
        let entity = named_datasource("prom-new", "PrometheusDatasource", true);
        let siblings = vec![
            named_datasource("tempo-main", "TempoDatasource", true),
            named_datasource("prom-main", "PrometheusDatasource", true),
        ];
        let err = validate_datasource(&entity, &siblings, &registry(), None).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::DuplicateDefaultNamed { name, kind, existing }
                if name == "prom-new"
                    && kind == "PrometheusDatasource"
                    && existing == "prom-main"
        ));
    }

    #[test]
    fn test_datasource_non_default_skips_sibling_scan() {
        let entity = named_datasource("prom-new", "PrometheusDatasource", false);
        let siblings = vec![named_datasource("prom-main", "PrometheusDatasource", true)];
        validate_datasource(&entity, &siblings, &registry(), None).unwrap();
    }

    #[test]
    fn test_datasource_default_without_conflicting_sibling_accepted() {
        let entity = named_datasource("prom-main", "PrometheusDatasource", true);
        let siblings = vec![named_datasource("prom-alt", "PrometheusDatasource", false)];
        validate_datasource(&entity, &siblings, &registry(), None).unwrap();
    }

    #[test]
    fn test_datasource_plugin_error_precedes_uniqueness_check() {
        let entity = named_datasource("mystery", "MysteryDatasource", true);
        let siblings = vec![named_datasource("mystery-main", "MysteryDatasource", true)];
        let err = validate_datasource(&entity, &siblings, &registry(), None).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedKind { .. }));
    }

    #[test]
    fn test_plugin_field_error_precedes_schema_check() {
        use crate::infrastructure::config::HttpSettings;
        use crate::infrastructure::plugin_registry::default_registry;

        let registry = default_registry(&HttpSettings {
            allowed_schemes: vec!["https".to_string()],
            kinds: vec!["HTTPDatasource".to_string()],
        });
        let mut entity = named_datasource("prom-main", "HTTPDatasource", true);
        entity.spec.plugin = Plugin::new(
            "HTTPDatasource",
            json!({ "direct_url": "ftp://archive.example.com" }),
        );
        let err =
            validate_datasource(&entity, &[], &registry, Some(&RejectingSchema)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let dashboard = dashboard(vec![
            embedded("PrometheusDatasource", true),
            embedded("PrometheusDatasource", true),
        ]);
        let registry = registry();
        let first = validate_dashboard(&dashboard, &registry, None).unwrap_err();
        let second = validate_dashboard(&dashboard, &registry, None).unwrap_err();
        assert_eq!(first.to_string(), second.to_string());
    }
}
