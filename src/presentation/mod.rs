// Presentation layer - CLI commands
pub mod command;
pub mod lint;
