//! The console application: registry ownership, command installation, and
//! argv dispatch.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use crate::discover;
use crate::error::ConsoleResult;
use crate::exit_codes;
use crate::registry::CommandRegistry;
use crate::types::TypeRegistry;
use crate::ConsoleError;

/// Identifier prefix of the commands shipped with this crate.
pub const INTERNAL_PREFIX: &str = "herald_console::commands";

/// The console application.
///
/// Owns the type registry and the command registry for one CLI invocation.
/// Commands are installed once at startup; `run_from` then parses argv,
/// matches a registered command name, and returns the command's exit code.
pub struct ConsoleApp {
    name: String,
    version: String,
    about: String,
    types: TypeRegistry,
    registry: CommandRegistry,
}

impl ConsoleApp {
    /// Create an application over every command type linked into the binary.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_types(name, TypeRegistry::linked())
    }

    /// Create an application over an explicit type registry.
    pub fn with_types(name: impl Into<String>, types: TypeRegistry) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            about: String::new(),
            types,
            registry: CommandRegistry::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = about.into();
        self
    }

    /// Register the commands shipped with this crate.
    ///
    /// The built-in tree is compiled into the library, so registration reads
    /// the type registry directly instead of walking source files.
    pub fn install_internal_commands(&mut self) -> ConsoleResult<()> {
        discover::install_prefixed(&self.types, &mut self.registry, INTERNAL_PREFIX)
    }

    /// Walk `root` and register every file that resolves to a concrete
    /// command type under `prefix`. See [`discover`] for the transform and
    /// the skip rules.
    pub fn install_commands(&mut self, root: &Path, prefix: &str) -> ConsoleResult<()> {
        discover::install_commands(&self.types, &mut self.registry, root, prefix)
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Parse `argv`, dispatch to the matching command, and return its exit
    /// code. Parse errors print clap's rendering and return the usage code.
    pub fn run_from<I, T>(&self, argv: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut root = clap::Command::new(self.name.clone())
            .version(self.version.clone())
            .about(self.about.clone())
            .subcommand_required(true)
            .arg_required_else_help(true);

        for registered in self.registry.iter() {
            let sub = clap::Command::new(registered.metadata.name.clone())
                .about(registered.metadata.description.clone());
            root = root.subcommand(registered.command.configure(sub));
        }

        let matches = match root.try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) => {
                let _ = err.print();
                return if err.use_stderr() {
                    exit_codes::USAGE
                } else {
                    // --help / --version render to stdout and are not errors.
                    exit_codes::SUCCESS
                };
            }
        };

        let Some((name, sub_matches)) = matches.subcommand() else {
            return exit_codes::USAGE;
        };
        let Some(registered) = self.registry.get(name) else {
            return exit_codes::USAGE;
        };

        let input = CommandInput::new(sub_matches);
        let mut output = ConsoleOutput::stdout();
        match registered.command.execute(&input, &mut output) {
            Ok(code) => code,
            Err(err) => {
                eprintln!("{name}: {err:?}");
                err.downcast_ref::<ConsoleError>()
                    .map(ConsoleError::exit_code)
                    .unwrap_or(exit_codes::FAILURE)
            }
        }
    }
}

/// Parsed input handed to a command's `execute`.
pub struct CommandInput<'a> {
    matches: &'a clap::ArgMatches,
}

impl<'a> CommandInput<'a> {
    pub fn new(matches: &'a clap::ArgMatches) -> Self {
        Self { matches }
    }

    /// Boolean flag value.
    pub fn flag(&self, id: &str) -> bool {
        self.matches.get_flag(id)
    }

    /// String option value.
    pub fn option(&self, id: &str) -> Option<&str> {
        self.matches.get_one::<String>(id).map(String::as_str)
    }

    pub fn matches(&self) -> &clap::ArgMatches {
        self.matches
    }
}

enum Sink {
    Stdout,
    Buffer(Vec<u8>),
}

/// Output handle handed to a command's `execute`. Writes to stdout in
/// production; tests capture into a buffer.
pub struct ConsoleOutput {
    sink: Sink,
}

impl ConsoleOutput {
    pub fn stdout() -> Self {
        Self { sink: Sink::Stdout }
    }

    pub fn buffer() -> Self {
        Self {
            sink: Sink::Buffer(Vec::new()),
        }
    }

    pub fn line(&mut self, line: &str) {
        match &mut self.sink {
            Sink::Stdout => println!("{line}"),
            Sink::Buffer(buf) => {
                let _ = writeln!(buf, "{line}");
            }
        }
    }

    /// Render an aligned table. Column widths fit the widest cell.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() && cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let render = |cells: Vec<String>, widths: &[usize]| -> String {
            let mut line = String::new();
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    line.push_str("  ");
                }
                line.push_str(&format!("{cell:<width$}", width = widths[i]));
            }
            line.trim_end().to_string()
        };

        let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let dash_cells: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        self.line(&render(header_cells, &widths));
        self.line(&render(dash_cells, &widths));
        for row in rows {
            self.line(&render(row.clone(), &widths));
        }
    }

    /// Captured output; empty for the stdout sink.
    pub fn captured(&self) -> &str {
        match &self.sink {
            Sink::Stdout => "",
            Sink::Buffer(buf) => std::str::from_utf8(buf).unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CommandMetadata, ConsoleCommand, RegisteredCommand};

    struct Exit(i32);

    impl ConsoleCommand for Exit {
        fn execute(
            &self,
            _input: &CommandInput<'_>,
            _output: &mut ConsoleOutput,
        ) -> anyhow::Result<i32> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl ConsoleCommand for Failing {
        fn execute(
            &self,
            _input: &CommandInput<'_>,
            _output: &mut ConsoleOutput,
        ) -> anyhow::Result<i32> {
            Err(anyhow::anyhow!("boom"))
        }
    }

    fn app_with(name: &str, command: Box<dyn ConsoleCommand>) -> ConsoleApp {
        let mut app = ConsoleApp::with_types("test-console", TypeRegistry::new());
        app.registry_mut().insert(RegisteredCommand {
            identifier: format!("test::{name}"),
            metadata: CommandMetadata {
                name: name.to_string(),
                description: String::new(),
            },
            command,
        });
        app
    }

    #[test]
    fn dispatch_returns_command_exit_code() {
        let app = app_with("seven", Box::new(Exit(7)));
        assert_eq!(app.run_from(["test-console", "seven"]), 7);
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        let app = app_with("seven", Box::new(Exit(7)));
        assert_eq!(app.run_from(["test-console", "eight"]), exit_codes::USAGE);
    }

    #[test]
    fn command_error_maps_to_failure() {
        let app = app_with("broken", Box::new(Failing));
        assert_eq!(
            app.run_from(["test-console", "broken"]),
            exit_codes::FAILURE
        );
    }

    #[test]
    fn table_aligns_columns() {
        let mut output = ConsoleOutput::buffer();
        output.table(
            &["uri", "method"],
            &[
                vec!["/users".to_string(), "GET".to_string()],
                vec!["/".to_string(), "POST".to_string()],
            ],
        );

        let lines: Vec<_> = output.captured().lines().collect();
        assert_eq!(lines[0], "uri     method");
        assert_eq!(lines[1], "------  ------");
        assert_eq!(lines[2], "/users  GET");
        assert_eq!(lines[3], "/       POST");
    }
}
