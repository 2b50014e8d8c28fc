//! Console-command infrastructure for Herald.
//!
//! This crate provides:
//!
//! - A process-wide [`CommandRegistry`] populated once at startup and
//!   read-only during dispatch
//! - Convention-based command discovery: a directory tree is mapped onto
//!   command type identifiers and matching types are registered
//! - A link-time [`TypeRegistry`] standing in for runtime reflection, fed by
//!   the [`declare_command!`] macro
//! - A worker-process bootstrap behind the [`runtime::WorkerRuntime`] seam,
//!   plus the built-in `start` / `stop` / `status` / `route:list` commands
//! - Plugin scaffolding install/uninstall and string-case utilities
//!
//! # Quick start
//!
//! ```no_run
//! use herald_console::ConsoleApp;
//!
//! fn main() {
//!     let mut app = ConsoleApp::new("herald");
//!     app.install_internal_commands().expect("internal commands");
//!     std::process::exit(app.run_from(std::env::args_os()));
//! }
//! ```

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod console;
pub mod discover;
pub mod error;
pub mod exit_codes;
pub mod install;
pub mod registry;
pub mod runtime;
pub mod templates;
pub mod types;
pub mod util;

pub use console::{CommandInput, ConsoleApp, ConsoleOutput};
pub use error::ConsoleError;
pub use registry::{CommandMetadata, CommandRegistry, ConsoleCommand, RegisteredCommand};
pub use types::{CommandType, TypeRegistry, COMMAND_TYPES};

// Re-exported so `declare_command!` expansions resolve without a direct
// linkme dependency in the defining crate.
#[doc(hidden)]
pub use linkme;
