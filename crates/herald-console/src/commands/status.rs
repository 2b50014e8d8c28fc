//! `status`: report worker liveness.

use crate::console::{CommandInput, ConsoleOutput};
use crate::declare_command;
use crate::exit_codes;
use crate::registry::ConsoleCommand;
use crate::runtime;

#[derive(Default)]
pub struct StatusCommand;

declare_command!(
    StatusCommand,
    name = "status",
    description = "Show worker status."
);

impl ConsoleCommand for StatusCommand {
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::config_arg())
    }

    fn execute(
        &self,
        input: &CommandInput<'_>,
        output: &mut ConsoleOutput,
    ) -> anyhow::Result<i32> {
        let config = super::load_config(input)?;
        let status = runtime::default_runtime()?.status(&config.server)?;

        if status.processes.is_empty() {
            output.line(&format!("{} is not running", config.server.name));
            return Ok(exit_codes::FAILURE);
        }

        let rows: Vec<Vec<String>> = status
            .processes
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.pid.to_string(),
                    if p.alive { "running" } else { "stopped" }.to_string(),
                ]
            })
            .collect();
        output.table(&["process", "pid", "state"], &rows);

        Ok(if status.running() {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        })
    }
}
