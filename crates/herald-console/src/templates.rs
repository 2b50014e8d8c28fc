//! Scaffolding templates written by the installer.

pub const CONFIG_YAML: &str = r#"# Herald console configuration.
server:
  # listen: "http://0.0.0.0:8787"
  name: herald
  count: 1
  runtime_dir: runtime
  pid_file: runtime/herald.pid
  status_file: runtime/herald.status
  stdout_file: runtime/logs/stdout.log
  log_file: runtime/logs/herald.log
  max_package_size: 10485760
  stop_timeout: 2

# Custom worker processes supervised by `herald start`.
processes: {}

# Route table rendered by `herald route:list`.
routes: []
"#;

pub const LAUNCHER: &str = r#"#!/bin/sh
# Herald launcher. Keeps the console invocable as ./herald in project roots.
exec herald "$@"
"#;
