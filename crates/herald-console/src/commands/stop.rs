//! `stop`: stop all running workers.

use crate::console::{CommandInput, ConsoleOutput};
use crate::declare_command;
use crate::error::ConsoleError;
use crate::exit_codes;
use crate::registry::ConsoleCommand;
use crate::runtime;

#[derive(Default)]
pub struct StopCommand;

declare_command!(StopCommand, name = "stop", description = "Stop workers.");

impl ConsoleCommand for StopCommand {
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::config_arg())
    }

    fn execute(
        &self,
        input: &CommandInput<'_>,
        output: &mut ConsoleOutput,
    ) -> anyhow::Result<i32> {
        let config = super::load_config(input)?;
        match runtime::default_runtime()?.stop_all(&config.server) {
            Ok(()) => {
                output.line(&format!("{} stopped", config.server.name));
                Ok(exit_codes::SUCCESS)
            }
            Err(ConsoleError::NotRunning) => {
                output.line(&format!("{} is not running", config.server.name));
                Ok(exit_codes::FAILURE)
            }
            Err(err) => Err(err.into()),
        }
    }
}
