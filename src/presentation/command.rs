// Command option contract shared by CLI commands

use std::io::Write;

/// The lifecycle every command option goes through. A runner calls the
/// methods strictly in order: set_writer, complete, validate, execute.
pub trait CommandOption {
    /// Extract the option's attributes from the positional args.
    fn complete(&mut self, args: &[String]) -> anyhow::Result<()>;

    /// Check that the completed attributes are coherent.
    fn validate(&self) -> anyhow::Result<()>;

    /// Run the command's business logic.
    fn execute(&mut self) -> anyhow::Result<()>;

    fn set_writer(&mut self, writer: Box<dyn Write + Send>);
}

/// Drive a command option through its lifecycle, aborting at the first
/// stage that fails.
pub fn run(
    option: &mut dyn CommandOption,
    args: &[String],
    writer: Box<dyn Write + Send>,
) -> anyhow::Result<()> {
    option.set_writer(writer);
    option.complete(args)?;
    option.validate()?;
    option.execute()
}
