// Resource envelope shared by dashboards and datasources

use serde::Deserialize;

use super::dashboard::Dashboard;
use super::datasource::Datasource;

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub name: String,
}

/// Top-level resource as it appears in a configuration file, discriminated
/// by its `kind` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum Resource {
    Dashboard(Dashboard),
    Datasource(Datasource),
}
