//! Console configuration.
//!
//! Loaded from a YAML file (`herald.yaml` by default). A missing file yields
//! the defaults; a malformed file is a fatal configuration error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "herald.yaml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "HERALD_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: ServerConfig,

    /// Named custom worker processes started alongside the server.
    pub processes: BTreeMap<String, ProcessConfig>,

    /// Plugin process sections, nested vendor → project. Flattened to
    /// `plugin.{vendor}.{project}.{name}` at launch-plan time.
    pub plugins: BTreeMap<String, BTreeMap<String, PluginProject>>,

    /// Declarative route table rendered by `route:list`.
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address handed to the worker runtime, e.g.
    /// `http://0.0.0.0:8787`. `None` starts no main worker.
    pub listen: Option<String>,

    pub name: String,
    pub count: usize,
    pub user: Option<String>,
    pub group: Option<String>,
    pub reuse_port: bool,
    pub transport: String,
    pub protocol: Option<String>,

    pub runtime_dir: PathBuf,
    pub pid_file: PathBuf,
    pub status_file: PathBuf,
    pub stdout_file: PathBuf,
    pub log_file: PathBuf,

    pub max_package_size: u64,

    /// Seconds to wait for graceful shutdown before killing.
    pub stop_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: None,
            name: "herald".to_string(),
            count: 1,
            user: None,
            group: None,
            reuse_port: false,
            transport: "tcp".to_string(),
            protocol: None,
            runtime_dir: PathBuf::from("runtime"),
            pid_file: PathBuf::from("runtime/herald.pid"),
            status_file: PathBuf::from("runtime/herald.status"),
            stdout_file: PathBuf::from("runtime/logs/stdout.log"),
            log_file: PathBuf::from("runtime/logs/herald.log"),
            max_package_size: 10 * 1024 * 1024,
            stop_timeout: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub command: String,
    pub args: Vec<String>,
    pub count: usize,
    pub env: BTreeMap<String, String>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            args: Vec::new(),
            count: 1,
            env: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PluginProject {
    pub processes: BTreeMap<String, ProcessConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteEntry {
    pub path: String,
    pub methods: Vec<String>,
    pub handler: String,
    pub middleware: Vec<String>,
    pub name: Option<String>,
}

impl Default for RouteEntry {
    fn default() -> Self {
        Self {
            path: String::new(),
            methods: vec!["GET".to_string()],
            handler: String::new(),
            middleware: Vec::new(),
            name: None,
        }
    }
}

impl ConsoleConfig {
    /// Load from `path`. Missing file → defaults; unreadable or malformed
    /// file → configuration error.
    pub fn load(path: &Path) -> ConsoleResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConsoleError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&content)
            .map_err(|e| ConsoleError::config(format!("failed to parse {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConsoleConfig::load(&temp.path().join("herald.yaml")).unwrap();

        assert_eq!(config.server.name, "herald");
        assert_eq!(config.server.count, 1);
        assert_eq!(config.server.max_package_size, 10 * 1024 * 1024);
        assert_eq!(config.server.stop_timeout, 2);
        assert!(config.processes.is_empty());
    }

    #[test]
    fn parses_server_processes_and_routes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("herald.yaml");
        fs::write(
            &path,
            r#"
server:
  listen: "http://0.0.0.0:8787"
  count: 4
  stop_timeout: 5
processes:
  monitor:
    command: "herald-monitor"
    args: ["--watch", "app"]
routes:
  - path: /users
    methods: [GET, POST]
    handler: users::index
    name: users
"#,
        )
        .unwrap();

        let config = ConsoleConfig::load(&path).unwrap();
        assert_eq!(config.server.listen.as_deref(), Some("http://0.0.0.0:8787"));
        assert_eq!(config.server.count, 4);
        assert_eq!(config.server.stop_timeout, 5);
        assert_eq!(config.processes["monitor"].command, "herald-monitor");
        assert_eq!(config.processes["monitor"].count, 1);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].methods, ["GET", "POST"]);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("herald.yaml");
        fs::write(&path, "server: [not, a, mapping]").unwrap();

        let err = ConsoleConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Config { .. }));
    }
}
