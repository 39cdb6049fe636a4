// Validation error taxonomy

use thiserror::Error;

/// Every way a dashboard or datasource resource can be rejected.
/// Validation is fail-fast: the first violation found is returned as-is.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("variable {variable:?} references an unknown variable {reference:?}")]
    UnknownReference { variable: String, reference: String },

    #[error("variable dependency cycle detected involving {variable:?}")]
    CyclicDependency { variable: String },

    #[error("unsupported plugin kind {kind:?}")]
    UnsupportedKind { kind: String },

    #[error("unable to decode the spec of plugin kind {kind:?}: {reason}")]
    MalformedSpec { kind: String, reason: String },

    #[error("invalid field {field:?} in plugin kind {kind:?}: {reason}")]
    InvalidField {
        kind: String,
        field: String,
        reason: String,
    },

    #[error("schema validation failed: {reason}")]
    SchemaViolation { reason: String },

    // The dashboard-embedded path only knows the plugin kind; embedded
    // datasource specs carry no name of their own.
    #[error("there is already a default datasource defined for the kind {kind:?}")]
    DuplicateDefault { kind: String },

    #[error(
        "datasource {name:?} cannot be a default {kind:?} because there is already one defined named {existing:?}"
    )]
    DuplicateDefaultNamed {
        name: String,
        kind: String,
        existing: String,
    },
}
