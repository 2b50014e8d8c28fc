//! The command capability and the process-wide command registry.
//!
//! The registry is an explicit object owned by the console bootstrap for the
//! lifetime of one CLI invocation. It is populated once during startup and
//! read-only during dispatch; there is no implicit global.

use std::collections::HashMap;

use crate::console::{CommandInput, ConsoleOutput};

/// A unit of CLI-invokable behavior: a name, a description, and an execute
/// entry point returning an exit code.
pub trait ConsoleCommand: Send + Sync {
    /// Fallback name when no name was declared at registration time.
    fn default_name(&self) -> Option<&str> {
        None
    }

    /// Fallback description when none was declared at registration time.
    fn default_description(&self) -> &str {
        ""
    }

    /// Declare options and arguments on the command definition.
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Run the command and return its exit code.
    fn execute(&self, input: &CommandInput<'_>, output: &mut ConsoleOutput)
        -> anyhow::Result<i32>;
}

/// Name and description, resolved once at registration time and never
/// re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    pub name: String,
    pub description: String,
}

/// A command registered into the registry, ready for dispatch.
pub struct RegisteredCommand {
    /// Fully-qualified type identifier the command was resolved from.
    pub identifier: String,
    pub metadata: CommandMetadata,
    pub command: Box<dyn ConsoleCommand>,
}

/// Insertion-ordered command registry. Registering a second command under an
/// existing name replaces the first (last-registered wins, no dedup
/// guarantee).
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, command: RegisteredCommand) {
        let name = command.metadata.name.clone();
        match self.by_name.get(&name) {
            Some(&index) => self.commands[index] = command,
            None => {
                self.by_name.insert(name, self.commands.len());
                self.commands.push(command);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.by_name.get(name).map(|&index| &self.commands[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.iter()
    }

    /// Identifiers of every registered command, in registration order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.identifier.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl ConsoleCommand for Fixed {
        fn execute(
            &self,
            _input: &CommandInput<'_>,
            output: &mut ConsoleOutput,
        ) -> anyhow::Result<i32> {
            output.line(self.0);
            Ok(0)
        }
    }

    fn registered(identifier: &str, name: &str, marker: &'static str) -> RegisteredCommand {
        RegisteredCommand {
            identifier: identifier.to_string(),
            metadata: CommandMetadata {
                name: name.to_string(),
                description: String::new(),
            },
            command: Box::new(Fixed(marker)),
        }
    }

    #[test]
    fn insert_and_lookup_by_name() {
        let mut registry = CommandRegistry::new();
        registry.insert(registered("app::commands::ping", "ping", "pong"));

        let cmd = registry.get("ping").unwrap();
        assert_eq!(cmd.identifier, "app::commands::ping");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn duplicate_name_last_registered_wins() {
        let mut registry = CommandRegistry::new();
        registry.insert(registered("app::commands::ping", "ping", "first"));
        registry.insert(registered("app::commands::other::ping", "ping", "second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("ping").unwrap().identifier,
            "app::commands::other::ping"
        );
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.insert(registered("a::one", "one", "1"));
        registry.insert(registered("a::two", "two", "2"));
        registry.insert(registered("a::three", "three", "3"));

        let names: Vec<_> = registry.iter().map(|c| c.metadata.name.as_str()).collect();
        assert_eq!(names, ["one", "two", "three"]);
    }
}
