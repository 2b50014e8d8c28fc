//! `start`: prepare the launch plan and hand it to the worker runtime.

use clap::{Arg, ArgAction};

use crate::bootstrap;
use crate::console::{CommandInput, ConsoleOutput};
use crate::declare_command;
use crate::exit_codes;
use crate::registry::ConsoleCommand;
use crate::runtime;

#[derive(Default)]
pub struct StartCommand;

declare_command!(
    StartCommand,
    name = "start",
    description = "Start workers in DEBUG mode. Use -d to start in DAEMON mode."
);

impl ConsoleCommand for StartCommand {
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::config_arg()).arg(
            Arg::new("daemon")
                .long("daemon")
                .short('d')
                .action(ArgAction::SetTrue)
                .help("DAEMON mode"),
        )
    }

    fn execute(
        &self,
        input: &CommandInput<'_>,
        output: &mut ConsoleOutput,
    ) -> anyhow::Result<i32> {
        let config = super::load_config(input)?;
        let daemon = input.flag("daemon");
        let plan = bootstrap::prepare(&config, daemon)?;

        output.line(&format!(
            "{} starting: listen={} processes={} mode={}",
            plan.server.name,
            plan.server.listen.as_deref().unwrap_or("-"),
            plan.processes.len(),
            if daemon { "DAEMON" } else { "DEBUG" },
        ));

        runtime::default_runtime()?.start(&plan)?;
        Ok(exit_codes::SUCCESS)
    }
}
