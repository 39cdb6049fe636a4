// Main entry point - Configuration loading and command dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use crate::infrastructure::config::load_validation_settings;
use crate::infrastructure::plugin_registry::default_registry;
use crate::presentation::command;
use crate::presentation::lint::LintOption;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration and build the plugin registry
    let settings = load_validation_settings()?;
    let registry = default_registry(&settings.http);

    // Run the lint command over the file arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut lint = LintOption::new(registry);
    command::run(&mut lint, &args, Box::new(std::io::stdout()))
}
