//! Built-in console commands.
//!
//! Each module holds exactly one command type and registers it with
//! `declare_command!`, so the tree is discoverable under the
//! `herald_console::commands` prefix. All of them are thin delegations into
//! the library; no business logic lives here beyond output formatting.

pub mod plugin_install;
pub mod plugin_uninstall;
pub mod route_list;
pub mod start;
pub mod status;
pub mod stop;

use std::path::Path;

use clap::Arg;

use crate::config::{ConsoleConfig, CONFIG_ENV, DEFAULT_CONFIG_FILE};
use crate::console::CommandInput;
use crate::error::ConsoleResult;

pub(crate) fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .env(CONFIG_ENV)
        .default_value(DEFAULT_CONFIG_FILE)
        .help("Configuration file path")
}

pub(crate) fn load_config(input: &CommandInput<'_>) -> ConsoleResult<ConsoleConfig> {
    let path = input.option("config").unwrap_or(DEFAULT_CONFIG_FILE);
    ConsoleConfig::load(Path::new(path))
}
