//! Convention-based command discovery.
//!
//! A directory tree is the registration surface: each `.rs` file's path
//! relative to the walk root, joined with a namespace prefix, yields a
//! fully-qualified type identifier. Identifiers that resolve to a concrete
//! command type in the [`TypeRegistry`] are instantiated and registered;
//! everything else in the tree is skipped silently. Mixed trees are expected
//! and the silent-skip policy is deliberate: a typo'd path and an
//! intentionally-colocated non-command file are indistinguishable here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConsoleError, ConsoleResult};
use crate::registry::{CommandMetadata, CommandRegistry, RegisteredCommand};
use crate::types::{CommandType, TypeRegistry};

/// Source extension that marks a candidate file.
const SOURCE_EXTENSION: &str = "rs";

/// Derive the fully-qualified identifier for a file at `relative` under a
/// walk root registered with `prefix`.
///
/// The transform is the one wire format of discovery and must stay stable:
/// strip the source extension, convert path separators to `::`, prepend the
/// prefix. `admin/ping.rs` under prefix `app::commands` becomes
/// `app::commands::admin::ping`. No case conversion is applied.
pub fn derive_identifier(prefix: &str, relative: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    let prefix = prefix.trim_matches(':');
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }
    let mut components = relative.components().peekable();
    while let Some(component) = components.next() {
        let name = component.as_os_str().to_string_lossy();
        if components.peek().is_none() {
            let stem = name
                .strip_suffix(&format!(".{SOURCE_EXTENSION}"))
                .map(str::to_string)
                .unwrap_or_else(|| name.to_string());
            parts.push(stem);
        } else {
            parts.push(name.to_string());
        }
    }
    parts.join("::")
}

/// Walk `root` and register every file resolving to a concrete command type.
///
/// Failure taxonomy: a concrete type without any name source is a fatal
/// configuration error that aborts the remaining walk; every other mismatch
/// (hidden file, wrong extension, unresolved identifier, abstract type) is a
/// debug-logged skip.
pub fn install_commands(
    types: &TypeRegistry,
    registry: &mut CommandRegistry,
    root: &Path,
    prefix: &str,
) -> ConsoleResult<()> {
    for file in walk_files(root)? {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.starts_with('.') {
            continue;
        }
        if file.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }

        let relative = file.strip_prefix(root).unwrap_or(file.as_path());
        let identifier = derive_identifier(prefix, relative);
        let Some(ty) = types.resolve(&identifier) else {
            debug!(identifier = %identifier, path = %file.display(), "no command type for file, skipping");
            continue;
        };
        register_type(registry, ty)?;
    }
    Ok(())
}

/// Register every linked type under `prefix` straight from the type
/// registry, skipping abstract and factory-less descriptors.
pub fn install_prefixed(
    types: &TypeRegistry,
    registry: &mut CommandRegistry,
    prefix: &str,
) -> ConsoleResult<()> {
    let qualified = format!("{prefix}::");
    for ty in types.iter_sorted() {
        if ty.identifier == prefix || ty.identifier.starts_with(&qualified) {
            register_type(registry, ty)?;
        }
    }
    Ok(())
}

/// Instantiate `ty` and insert it into the registry.
///
/// Metadata resolution is two-tier: a declared name (with its declared
/// description) wins; otherwise the instance's `default_name()` and
/// `default_description()` are consulted. No name from either source is the
/// one fatal error of discovery.
fn register_type(registry: &mut CommandRegistry, ty: &'static CommandType) -> ConsoleResult<()> {
    if ty.is_abstract {
        debug!(identifier = ty.identifier, "abstract command type, skipping");
        return Ok(());
    }
    let Some(factory) = ty.factory else {
        debug!(identifier = ty.identifier, "command type without factory, skipping");
        return Ok(());
    };

    let command = factory();
    let (name, description) = match (ty.declared_name, command.default_name()) {
        (Some(name), _) => (
            name.to_string(),
            ty.declared_description.unwrap_or("").to_string(),
        ),
        (None, Some(name)) => (name.to_string(), command.default_description().to_string()),
        (None, None) => {
            return Err(ConsoleError::MissingCommandName {
                identifier: ty.identifier.to_string(),
            })
        }
    };

    debug!(identifier = ty.identifier, name = %name, "registering command");
    registry.insert(RegisteredCommand {
        identifier: ty.identifier.to_string(),
        metadata: CommandMetadata { name, description },
        command,
    });
    Ok(())
}

/// Lazily enumerate every regular file under `root`. Order is
/// filesystem-dependent; hidden directories are descended into (only file
/// names are checked against the hidden rule, by the caller).
fn walk_files(root: &Path) -> ConsoleResult<Walk> {
    let entries = fs::read_dir(root).map_err(|e| ConsoleError::io(root, e))?;
    Ok(Walk {
        stack: vec![entries],
    })
}

struct Walk {
    stack: Vec<fs::ReadDir>,
}

impl Iterator for Walk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entries = self.stack.last_mut()?;
            let Some(entry) = entries.next() else {
                self.stack.pop();
                continue;
            };
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => {
                    if let Ok(nested) = fs::read_dir(&path) {
                        self.stack.push(nested);
                    }
                }
                Ok(ft) if ft.is_file() => return Some(path),
                _ => {}
            }
        }
    }
}
