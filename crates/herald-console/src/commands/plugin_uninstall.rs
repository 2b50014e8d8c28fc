//! `plugin:uninstall`: remove the Herald scaffolding from a project
//! directory.

use std::path::Path;

use clap::Arg;

use crate::console::{CommandInput, ConsoleOutput};
use crate::declare_command;
use crate::exit_codes;
use crate::install;
use crate::registry::ConsoleCommand;

#[derive(Default)]
pub struct PluginUninstallCommand;

declare_command!(
    PluginUninstallCommand,
    name = "plugin:uninstall",
    description = "Remove the Herald launcher and config scaffolding."
);

impl ConsoleCommand for PluginUninstallCommand {
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("path")
                .long("path")
                .value_name("DIR")
                .default_value(".")
                .help("Project directory to uninstall from"),
        )
    }

    fn execute(
        &self,
        input: &CommandInput<'_>,
        output: &mut ConsoleOutput,
    ) -> anyhow::Result<i32> {
        let base = Path::new(input.option("path").unwrap_or("."));
        let removed = install::uninstall(base)?;

        if removed.is_empty() {
            output.line("Nothing to remove");
        }
        for path in &removed {
            output.line(&format!("Removed {}", path.display()));
        }
        Ok(exit_codes::SUCCESS)
    }
}
