//! Startup bootstrap: runtime directories and launch-plan assembly.
//!
//! The bootstrap resolves configuration into a fully-expanded [`LaunchPlan`]
//! and leaves the event loop to the [`WorkerRuntime`](crate::runtime::WorkerRuntime)
//! implementation. One-shot, no retries: any failure here aborts startup.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::{ConsoleConfig, ProcessConfig, ServerConfig};
use crate::error::{ConsoleError, ConsoleResult};

/// Fully-resolved start request handed to the worker runtime.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub server: ServerConfig,
    pub processes: Vec<ProcessPlan>,
    pub daemon: bool,
}

/// One custom process to supervise.
#[derive(Debug, Clone)]
pub struct ProcessPlan {
    /// Dotted process name, e.g. `monitor` or `plugin.acme.shop.queue`.
    pub name: String,
    pub config: ProcessConfig,
}

/// Create the runtime directories and assemble the launch plan.
pub fn prepare(config: &ConsoleConfig, daemon: bool) -> ConsoleResult<LaunchPlan> {
    ensure_dir(&config.server.runtime_dir.join("logs"))?;
    ensure_dir(&config.server.runtime_dir.join("views"))?;

    let mut processes = Vec::new();
    for (name, process) in &config.processes {
        processes.push(ProcessPlan {
            name: name.clone(),
            config: process.clone(),
        });
    }
    for (vendor, projects) in &config.plugins {
        for (project, section) in projects {
            for (name, process) in &section.processes {
                processes.push(ProcessPlan {
                    name: format!("plugin.{vendor}.{project}.{name}"),
                    config: process.clone(),
                });
            }
        }
    }

    info!(
        name = %config.server.name,
        listen = config.server.listen.as_deref().unwrap_or("-"),
        processes = processes.len(),
        daemon,
        "launch plan prepared"
    );

    Ok(LaunchPlan {
        server: config.server.clone(),
        processes,
        daemon,
    })
}

fn ensure_dir(path: &Path) -> ConsoleResult<()> {
    fs::create_dir_all(path).map_err(|e| ConsoleError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PluginProject, ProcessConfig};
    use tempfile::TempDir;

    fn config_in(temp: &TempDir) -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        config.server.runtime_dir = temp.path().join("runtime");
        config
    }

    #[test]
    fn prepare_creates_runtime_directories() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);

        prepare(&config, false).unwrap();

        assert!(temp.path().join("runtime/logs").is_dir());
        assert!(temp.path().join("runtime/views").is_dir());
    }

    #[test]
    fn plugin_processes_flatten_to_dotted_names() {
        let temp = TempDir::new().unwrap();
        let mut config = config_in(&temp);
        config.processes.insert(
            "monitor".to_string(),
            ProcessConfig {
                command: "true".to_string(),
                ..Default::default()
            },
        );
        let mut project = PluginProject::default();
        project.processes.insert(
            "queue".to_string(),
            ProcessConfig {
                command: "true".to_string(),
                ..Default::default()
            },
        );
        config
            .plugins
            .entry("acme".to_string())
            .or_default()
            .insert("shop".to_string(), project);

        let plan = prepare(&config, true).unwrap();
        let names: Vec<_> = plan.processes.iter().map(|p| p.name.as_str()).collect();

        assert!(plan.daemon);
        assert_eq!(names, ["monitor", "plugin.acme.shop.queue"]);
    }
}
