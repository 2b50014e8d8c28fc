//! Registration-based type registry.
//!
//! PHP-style frameworks resolve a class-name string to a loaded class at
//! runtime; Rust has no such mechanism. Command types instead register a
//! static descriptor into a link-time distributed slice, and discovery
//! resolves derived identifiers against the collected map.

use std::collections::HashMap;

use linkme::distributed_slice;

use crate::registry::ConsoleCommand;

/// Factory producing a fresh command instance.
pub type CommandFactory = fn() -> Box<dyn ConsoleCommand>;

/// Static descriptor of a command type.
///
/// Normally produced by [`declare_command!`](crate::declare_command), whose
/// identifier defaults to `module_path!()`: one command type per module
/// file, the Rust analog of a one-class-per-file convention.
pub struct CommandType {
    /// Fully-qualified identifier, `::`-separated.
    pub identifier: &'static str,

    /// Abstract types exist in the registry but are never registered as
    /// commands.
    pub is_abstract: bool,

    /// Explicitly declared name, preferred over the instance's
    /// `default_name()`.
    pub declared_name: Option<&'static str>,

    /// Explicitly declared description. Only consulted when a name was
    /// declared.
    pub declared_description: Option<&'static str>,

    /// Instance factory. Descriptors without one are skipped.
    pub factory: Option<CommandFactory>,
}

/// Every command type linked into the binary.
// linkme places the slice via `#[link_section]` statics.
#[allow(unsafe_code)]
#[distributed_slice]
pub static COMMAND_TYPES: [CommandType] = [..];

/// Identifier → descriptor map.
///
/// [`TypeRegistry::linked`] collects the distributed slice; [`register`]
/// exists for tests and embedders that assemble the map by hand. Duplicate
/// identifiers: last registered wins.
///
/// [`register`]: TypeRegistry::register
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, &'static CommandType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every descriptor linked into the current binary.
    pub fn linked() -> Self {
        let mut registry = Self::new();
        for ty in COMMAND_TYPES.iter() {
            registry.register(ty);
        }
        registry
    }

    pub fn register(&mut self, ty: &'static CommandType) {
        self.types.insert(ty.identifier, ty);
    }

    pub fn resolve(&self, identifier: &str) -> Option<&'static CommandType> {
        self.types.get(identifier).copied()
    }

    /// All descriptors, sorted by identifier for deterministic iteration
    /// (link order is not stable).
    pub fn iter_sorted(&self) -> Vec<&'static CommandType> {
        let mut all: Vec<_> = self.types.values().copied().collect();
        all.sort_by_key(|ty| ty.identifier);
        all
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Declare a command type and register it into [`COMMAND_TYPES`].
///
/// The identifier is the declaring module's `module_path!()`, so the slice
/// entry must live in the module file the discovery transform maps to. One
/// command per module: the expansion defines a fixed-name static.
///
/// ```ignore
/// pub struct PingCommand;
/// declare_command!(PingCommand, name = "ping", description = "Reply with pong");
///
/// // Fall back to `default_name()` / `default_description()`:
/// declare_command!(StatusCommand);
///
/// // Present in the registry but never registered as a command:
/// declare_command!(abstract);
/// ```
#[macro_export]
macro_rules! declare_command {
    (abstract) => {
        #[allow(unsafe_code)]
        #[$crate::linkme::distributed_slice($crate::types::COMMAND_TYPES)]
        static __HERALD_COMMAND_TYPE: $crate::types::CommandType = $crate::types::CommandType {
            identifier: module_path!(),
            is_abstract: true,
            declared_name: None,
            declared_description: None,
            factory: None,
        };
    };
    ($ty:ty) => {
        #[allow(unsafe_code)]
        #[$crate::linkme::distributed_slice($crate::types::COMMAND_TYPES)]
        static __HERALD_COMMAND_TYPE: $crate::types::CommandType = $crate::types::CommandType {
            identifier: module_path!(),
            is_abstract: false,
            declared_name: None,
            declared_description: None,
            factory: Some(|| Box::new(<$ty>::default())),
        };
    };
    ($ty:ty, name = $name:expr) => {
        $crate::declare_command!($ty, name = $name, description = "");
    };
    ($ty:ty, name = $name:expr, description = $description:expr) => {
        #[allow(unsafe_code)]
        #[$crate::linkme::distributed_slice($crate::types::COMMAND_TYPES)]
        static __HERALD_COMMAND_TYPE: $crate::types::CommandType = $crate::types::CommandType {
            identifier: module_path!(),
            is_abstract: false,
            declared_name: Some($name),
            declared_description: Some($description),
            factory: Some(|| Box::new(<$ty>::default())),
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    static PING: CommandType = CommandType {
        identifier: "app::commands::ping",
        is_abstract: false,
        declared_name: Some("ping"),
        declared_description: Some("Reply with pong"),
        factory: None,
    };

    static PING_OVERRIDE: CommandType = CommandType {
        identifier: "app::commands::ping",
        is_abstract: true,
        declared_name: None,
        declared_description: None,
        factory: None,
    };

    #[test]
    fn resolve_registered_identifier() {
        let mut registry = TypeRegistry::new();
        registry.register(&PING);

        assert!(registry.resolve("app::commands::ping").is_some());
        assert!(registry.resolve("app::commands::pong").is_none());
    }

    #[test]
    fn duplicate_identifier_last_registered_wins() {
        let mut registry = TypeRegistry::new();
        registry.register(&PING);
        registry.register(&PING_OVERRIDE);

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("app::commands::ping").unwrap().is_abstract);
    }

    #[test]
    fn linked_registry_contains_builtin_commands() {
        let registry = TypeRegistry::linked();
        assert!(registry
            .resolve("herald_console::commands::start")
            .is_some());
        assert!(registry.resolve("herald_console::commands::stop").is_some());
    }
}
