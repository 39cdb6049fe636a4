// Plugin spec extraction - Registry of kind-specific decoders

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use crate::domain::error::ValidationError;
use crate::domain::plugin::Plugin;
use crate::infrastructure::config::HttpSettings;

/// Decodes a raw plugin spec payload into the kind's typed representation
/// and applies the kind's structural checks. Extractors never touch the
/// network; at most they normalize locally (trimming and the like).
pub trait PluginSpecExtractor: Send + Sync {
    fn extract(
        &self,
        kind: &str,
        spec: &serde_json::Value,
    ) -> Result<Box<dyn Any + Send>, ValidationError>;
}

/// Maps plugin kinds to their extractor. New kinds are registered here
/// without touching the validators that dispatch through it.
pub struct PluginRegistry {
    extractors: HashMap<String, Arc<dyn PluginSpecExtractor>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    pub fn register(&mut self, kind: impl Into<String>, extractor: Arc<dyn PluginSpecExtractor>) {
        self.extractors.insert(kind.into(), extractor);
    }

    pub fn extract(&self, plugin: &Plugin) -> Result<Box<dyn Any + Send>, ValidationError> {
        let extractor =
            self.extractors
                .get(&plugin.kind)
                .ok_or_else(|| ValidationError::UnsupportedKind {
                    kind: plugin.kind.clone(),
                })?;
        extractor.extract(&plugin.kind, &plugin.spec)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry preloaded with the HTTP extractor for every configured
/// HTTP-based datasource kind.
pub fn default_registry(settings: &HttpSettings) -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    let extractor: Arc<dyn PluginSpecExtractor> =
        Arc::new(HttpSpecExtractor::new(settings.allowed_schemes.clone()));
    for kind in &settings.kinds {
        registry.register(kind.clone(), extractor.clone());
    }
    registry
}

/// Typed spec of an HTTP-based datasource: either a direct URL or a proxy
/// through the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpDatasourceSpec {
    #[serde(default)]
    pub direct_url: Option<String>,
    #[serde(default)]
    pub proxy: Option<ProxySpec>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxySpec {
    pub url: String,
    #[serde(default)]
    pub allowed_endpoints: Vec<String>,
}

pub struct HttpSpecExtractor {
    allowed_schemes: Vec<String>,
}

impl HttpSpecExtractor {
    pub fn new(allowed_schemes: Vec<String>) -> Self {
        Self { allowed_schemes }
    }

    fn check_url(&self, kind: &str, field: &str, raw: &str) -> Result<(), ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                kind: kind.to_string(),
                field: field.to_string(),
                reason: "url must not be empty".to_string(),
            });
        }
        let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidField {
            kind: kind.to_string(),
            field: field.to_string(),
            reason: err.to_string(),
        })?;
        if !self.allowed_schemes.iter().any(|s| s == url.scheme()) {
            return Err(ValidationError::InvalidField {
                kind: kind.to_string(),
                field: field.to_string(),
                reason: format!("scheme {:?} is not allowed", url.scheme()),
            });
        }
        Ok(())
    }
}

impl PluginSpecExtractor for HttpSpecExtractor {
    fn extract(
        &self,
        kind: &str,
        spec: &serde_json::Value,
    ) -> Result<Box<dyn Any + Send>, ValidationError> {
        let decoded: HttpDatasourceSpec =
            serde_json::from_value(spec.clone()).map_err(|err| ValidationError::MalformedSpec {
                kind: kind.to_string(),
                reason: err.to_string(),
            })?;
        match (&decoded.direct_url, &decoded.proxy) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::InvalidField {
                    kind: kind.to_string(),
                    field: "direct_url".to_string(),
                    reason: "direct_url and proxy are mutually exclusive".to_string(),
                });
            }
            (None, None) => {
                return Err(ValidationError::InvalidField {
                    kind: kind.to_string(),
                    field: "direct_url".to_string(),
                    reason: "one of direct_url or proxy must be set".to_string(),
                });
            }
            (Some(direct_url), None) => self.check_url(kind, "direct_url", direct_url)?,
            (None, Some(proxy)) => self.check_url(kind, "proxy.url", &proxy.url)?,
        }
        Ok(Box::new(decoded))
    }
}
