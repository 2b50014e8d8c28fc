//! Error types for the console crate.

use std::path::PathBuf;

use crate::exit_codes;

/// Console errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A concrete command type has no resolvable name. Fatal: aborts the
    /// remaining discovery walk.
    #[error("command {identifier} has no name: declare one or implement default_name()")]
    MissingCommandName { identifier: String },

    /// Configuration file unreadable or malformed.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Filesystem operation failed.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Worker runtime operation failed.
    #[error("runtime error: {message}")]
    Runtime { message: String },

    /// Workers are already running.
    #[error("already running (pid {pid})")]
    AlreadyRunning { pid: u32 },

    /// No workers are running.
    #[error("not running")]
    NotRunning,
}

impl ConsoleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCommandName { .. } | Self::Config { .. } => exit_codes::CONFIG_ERROR,
            Self::Io { .. }
            | Self::Runtime { .. }
            | Self::AlreadyRunning { .. }
            | Self::NotRunning => exit_codes::FAILURE,
        }
    }
}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;
