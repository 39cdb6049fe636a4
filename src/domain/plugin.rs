// Plugin descriptor domain model

use serde::Deserialize;

/// A kind-tagged configuration payload whose shape depends on the kind.
/// The raw spec stays opaque until a registered extractor decodes it.
#[derive(Debug, Clone, Deserialize)]
pub struct Plugin {
    pub kind: String,
    #[serde(default)]
    pub spec: serde_json::Value,
}

impl Plugin {
    pub fn new(kind: impl Into<String>, spec: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            spec,
        }
    }
}
