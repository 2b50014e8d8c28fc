//! `plugin:install`: write the Herald scaffolding into a project directory.

use std::path::Path;

use clap::Arg;

use crate::console::{CommandInput, ConsoleOutput};
use crate::declare_command;
use crate::exit_codes;
use crate::install;
use crate::registry::ConsoleCommand;

#[derive(Default)]
pub struct PluginInstallCommand;

declare_command!(
    PluginInstallCommand,
    name = "plugin:install",
    description = "Install the Herald launcher and config scaffolding."
);

impl ConsoleCommand for PluginInstallCommand {
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("path")
                .long("path")
                .value_name("DIR")
                .default_value(".")
                .help("Project directory to install into"),
        )
    }

    fn execute(
        &self,
        input: &CommandInput<'_>,
        output: &mut ConsoleOutput,
    ) -> anyhow::Result<i32> {
        let base = Path::new(input.option("path").unwrap_or("."));
        let created = install::install(base)?;

        if created.is_empty() {
            output.line("Nothing to install (all files exist)");
        }
        for path in &created {
            output.line(&format!("Created {}", path.display()));
        }
        Ok(exit_codes::SUCCESS)
    }
}
