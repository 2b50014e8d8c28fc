//! Plugin scaffolding: copy the launcher and config templates into a host
//! project, and remove them again on uninstall.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ConsoleError, ConsoleResult};
use crate::templates;

/// Launcher file name written into the project root.
pub const LAUNCHER_FILE: &str = "herald";

/// Destination path (relative to the project root) → template content.
const PATH_RELATION: &[(&str, &str)] = &[("herald.yaml", templates::CONFIG_YAML)];

/// Install the scaffolding into `base`. Existing files are left alone.
/// Returns the paths actually created.
pub fn install(base: &Path) -> ConsoleResult<Vec<PathBuf>> {
    let mut created = Vec::new();

    let launcher = base.join(LAUNCHER_FILE);
    if write_if_missing(&launcher, templates::LAUNCHER)? {
        make_executable(&launcher)?;
        created.push(launcher);
    }

    for (dest, content) in PATH_RELATION {
        let path = base.join(dest);
        if write_if_missing(&path, content)? {
            created.push(path);
        }
    }

    for path in &created {
        info!(path = %path.display(), "installed");
    }
    Ok(created)
}

/// Remove the launcher and every mapped file from `base`. Missing paths are
/// not errors.
pub fn uninstall(base: &Path) -> ConsoleResult<Vec<PathBuf>> {
    let mut removed = Vec::new();

    let launcher = base.join(LAUNCHER_FILE);
    if launcher.is_file() {
        fs::remove_file(&launcher).map_err(|e| ConsoleError::io(&launcher, e))?;
        removed.push(launcher);
    }

    for (dest, _) in PATH_RELATION {
        let path = base.join(dest);
        if path.is_file() {
            fs::remove_file(&path).map_err(|e| ConsoleError::io(&path, e))?;
            removed.push(path);
        }
    }

    for path in &removed {
        info!(path = %path.display(), "removed");
    }
    Ok(removed)
}

fn write_if_missing(path: &Path, content: &str) -> ConsoleResult<bool> {
    if path.exists() {
        info!(path = %path.display(), "skipped (exists)");
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConsoleError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ConsoleError::io(path, e))?;
    Ok(true)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> ConsoleResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| ConsoleError::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> ConsoleResult<()> {
    Ok(())
}
