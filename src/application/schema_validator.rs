// Schema validation capability consumed by the validators

use crate::domain::dashboard::{Panel, Variable};
use crate::domain::error::ValidationError;
use crate::domain::plugin::Plugin;

/// Deep structural checks against a registry of declared schemas.
///
/// The validators take this capability as an `Option`: `None` means schema
/// enforcement is not configured and the schema stages are skipped, which is
/// not the same thing as having validated and passed.
pub trait SchemaValidator: Send + Sync {
    fn validate_dashboard_variables(&self, variables: &[Variable]) -> Result<(), ValidationError>;

    fn validate_panels(&self, panels: &[Panel]) -> Result<(), ValidationError>;

    fn validate_datasource(&self, plugin: &Plugin) -> Result<(), ValidationError>;
}
