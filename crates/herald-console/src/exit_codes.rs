//! Unified exit codes for the Herald console.
//! These codes are part of the public contract of every built-in command.

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1; // Command ran and reported failure
pub const CONFIG_ERROR: i32 = 2; // Startup/configuration error
pub const USAGE: i32 = 2; // Argument parse error (clap's convention)
