// Datasource domain model

use serde::Deserialize;

use super::plugin::Plugin;
use super::resource::Metadata;

/// Top-level datasource resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Datasource {
    pub metadata: Metadata,
    pub spec: DatasourceSpec,
}

/// The spec shared by top-level datasources and the ones embedded in a
/// dashboard. Embedded specs carry no metadata of their own.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasourceSpec {
    #[serde(default)]
    pub default: bool,
    pub plugin: Plugin,
}

/// Anything that carries a datasource spec and a name. The default-uniqueness
/// check is written once against this trait so it applies to every datasource
/// flavor handed to it.
pub trait DatasourceEntity {
    fn datasource_spec(&self) -> &DatasourceSpec;
    fn name(&self) -> &str;
}

impl DatasourceEntity for Datasource {
    fn datasource_spec(&self) -> &DatasourceSpec {
        &self.spec
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}
