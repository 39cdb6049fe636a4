// Lint command - Validates dashboard and datasource resource files

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::application::validation::{validate_dashboard, validate_datasource};
use crate::domain::resource::Resource;
use crate::infrastructure::plugin_registry::PluginRegistry;
use crate::presentation::command::CommandOption;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Checks resource files before they are applied to the platform. Runs with
/// no schema capability configured, so only structural plugin validation and
/// the cross-entity invariants apply.
pub struct LintOption {
    registry: PluginRegistry,
    files: Vec<PathBuf>,
    writer: Option<Box<dyn Write + Send>>,
}

impl LintOption {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry,
            files: Vec::new(),
            writer: None,
        }
    }
}

impl CommandOption for LintOption {
    fn complete(&mut self, args: &[String]) -> anyhow::Result<()> {
        self.files = args.iter().map(PathBuf::from).collect();
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.files.is_empty() {
            anyhow::bail!("at least one resource file must be provided");
        }
        for path in &self.files {
            let supported = extension(path)
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
            if !supported {
                anyhow::bail!(
                    "unsupported file extension for {}, expected one of json, yaml, yml",
                    path.display()
                );
            }
        }
        Ok(())
    }

    fn execute(&mut self) -> anyhow::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .context("output writer is not configured")?;
        for path in &self.files {
            lint_file(&self.registry, path)?;
            writeln!(writer, "{} is valid", path.display())?;
        }
        Ok(())
    }

    fn set_writer(&mut self, writer: Box<dyn Write + Send>) {
        self.writer = Some(writer);
    }
}

fn lint_file(registry: &PluginRegistry, path: &Path) -> anyhow::Result<()> {
    tracing::debug!("Linting {}", path.display());
    let raw = fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let resource: Resource = match extension(path).as_deref() {
        Some("json") => serde_json::from_str(&raw)
            .with_context(|| format!("unable to decode {}", path.display()))?,
        _ => serde_yaml::from_str(&raw)
            .with_context(|| format!("unable to decode {}", path.display()))?,
    };
    match resource {
        Resource::Dashboard(dashboard) => validate_dashboard(&dashboard, registry, None)
            .with_context(|| format!("{} is not a valid dashboard", path.display()))?,
        Resource::Datasource(datasource) => validate_datasource(&datasource, &[], registry, None)
            .with_context(|| format!("{} is not a valid datasource", path.display()))?,
    }
    Ok(())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
