//! The worker-runtime seam and the local pid-file supervisor.
//!
//! The event loop, socket handling, and protocol work belong to the host
//! runtime; this crate only assembles launch plans and talks to the runtime
//! through [`WorkerRuntime`]. [`LocalRuntime`] is the supervisor used by the
//! standalone CLI: it spawns the plan's processes and manages them through a
//! pid file, a status file, and unix signals.

use crate::bootstrap::LaunchPlan;
use crate::config::ServerConfig;
use crate::error::{ConsoleError, ConsoleResult};

/// External-collaborator boundary to the worker runtime.
pub trait WorkerRuntime {
    fn start(&self, plan: &LaunchPlan) -> ConsoleResult<()>;
    fn stop_all(&self, server: &ServerConfig) -> ConsoleResult<()>;
    fn status(&self, server: &ServerConfig) -> ConsoleResult<RuntimeStatus>;
}

/// Liveness snapshot reported by `status`.
#[derive(Debug, Clone, Default)]
pub struct RuntimeStatus {
    pub processes: Vec<ProcessStatus>,
}

#[derive(Debug, Clone)]
pub struct ProcessStatus {
    pub name: String,
    pub pid: u32,
    pub alive: bool,
}

impl RuntimeStatus {
    pub fn running(&self) -> bool {
        self.processes.iter().any(|p| p.alive)
    }
}

/// The runtime used when no host framework supplies one.
pub fn default_runtime() -> ConsoleResult<Box<dyn WorkerRuntime>> {
    #[cfg(unix)]
    {
        Ok(Box::new(LocalRuntime::new()))
    }
    #[cfg(not(unix))]
    {
        Err(ConsoleError::runtime(
            "process supervision requires a unix host",
        ))
    }
}

#[cfg(unix)]
pub use local::LocalRuntime;

#[cfg(unix)]
mod local {
    use super::*;

    use std::fs;
    use std::path::Path;
    use std::process::{Child, Command, Stdio};
    use std::time::{Duration, Instant};

    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;
    use tracing::{debug, info, warn};

    use crate::bootstrap::ProcessPlan;

    /// Pid-file based process supervisor.
    ///
    /// `start` spawns every process in the plan and records the pids in the
    /// status file. Foreground mode supervises until the children exit;
    /// daemon mode redirects child stdio to the configured stdout file and
    /// returns, leaving the children running.
    #[derive(Default)]
    pub struct LocalRuntime;

    impl LocalRuntime {
        pub fn new() -> Self {
            Self
        }
    }

    impl WorkerRuntime for LocalRuntime {
        fn start(&self, plan: &LaunchPlan) -> ConsoleResult<()> {
            let recorded = read_status(&plan.server.status_file);
            if let Some(entry) = recorded.iter().find(|e| pid_alive(e.pid)) {
                return Err(ConsoleError::AlreadyRunning { pid: entry.pid });
            }

            if plan.processes.is_empty() {
                warn!("no worker processes configured, nothing to supervise");
            }
            if plan.server.listen.is_some() {
                debug!(
                    listen = plan.server.listen.as_deref().unwrap_or(""),
                    "listen address is served by the host runtime, not the local supervisor"
                );
            }

            let mut children: Vec<(String, Child)> = Vec::new();
            for process in &plan.processes {
                for index in 0..process.config.count.max(1) {
                    let name = instance_name(process, index);
                    let child = spawn(plan, process, &name)?;
                    info!(name = %name, pid = child.id(), "worker started");
                    children.push((name, child));
                }
            }

            write_pid_file(&plan.server.pid_file, std::process::id())?;
            write_status(
                &plan.server.status_file,
                children.iter().map(|(name, child)| (name.as_str(), child.id())),
            )?;

            if plan.daemon {
                // Children keep running after this process exits.
                return Ok(());
            }

            for (name, mut child) in children {
                match child.wait() {
                    Ok(status) => info!(name = %name, code = status.code(), "worker exited"),
                    Err(e) => warn!(name = %name, error = %e, "wait failed"),
                }
            }
            remove_state_files(&plan.server);
            Ok(())
        }

        fn stop_all(&self, server: &ServerConfig) -> ConsoleResult<()> {
            let entries = read_status(&server.status_file);
            let alive: Vec<_> = entries.iter().filter(|e| pid_alive(e.pid)).collect();
            if alive.is_empty() {
                return Err(ConsoleError::NotRunning);
            }

            for entry in &alive {
                debug!(name = %entry.name, pid = entry.pid, "sending SIGTERM");
                let _ = kill(Pid::from_raw(entry.pid as i32), Signal::SIGTERM);
            }

            let deadline = Instant::now() + Duration::from_secs(server.stop_timeout);
            while Instant::now() < deadline && alive.iter().any(|e| pid_alive(e.pid)) {
                std::thread::sleep(Duration::from_millis(50));
            }
            for entry in &alive {
                if pid_alive(entry.pid) {
                    warn!(name = %entry.name, pid = entry.pid, "still alive, sending SIGKILL");
                    let _ = kill(Pid::from_raw(entry.pid as i32), Signal::SIGKILL);
                }
            }

            remove_state_files(server);
            Ok(())
        }

        fn status(&self, server: &ServerConfig) -> ConsoleResult<RuntimeStatus> {
            let processes = read_status(&server.status_file)
                .into_iter()
                .map(|e| ProcessStatus {
                    alive: pid_alive(e.pid),
                    name: e.name,
                    pid: e.pid,
                })
                .collect();
            Ok(RuntimeStatus { processes })
        }
    }

    fn instance_name(process: &ProcessPlan, index: usize) -> String {
        if process.config.count > 1 {
            format!("{}.{index}", process.name)
        } else {
            process.name.clone()
        }
    }

    fn spawn(plan: &LaunchPlan, process: &ProcessPlan, name: &str) -> ConsoleResult<Child> {
        if process.config.command.is_empty() {
            return Err(ConsoleError::config(format!(
                "process {name} has no command"
            )));
        }
        let mut cmd = Command::new(&process.config.command);
        cmd.args(&process.config.args).envs(&process.config.env);

        if plan.daemon {
            let stdout = open_output(&plan.server.stdout_file)?;
            let stderr = stdout
                .try_clone()
                .map_err(|e| ConsoleError::io(&plan.server.stdout_file, e))?;
            cmd.stdout(Stdio::from(stdout)).stderr(Stdio::from(stderr));
        }

        cmd.spawn().map_err(|e| {
            ConsoleError::runtime(format!(
                "failed to spawn {name} ({}): {e}",
                process.config.command
            ))
        })
    }

    fn open_output(path: &Path) -> ConsoleResult<fs::File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConsoleError::io(parent, e))?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ConsoleError::io(path, e))
    }

    struct StatusEntry {
        name: String,
        pid: u32,
    }

    fn read_status(path: &Path) -> Vec<StatusEntry> {
        let Ok(content) = fs::read_to_string(path) else {
            return Vec::new();
        };
        content
            .lines()
            .filter_map(|line| {
                let (name, pid) = line.split_once('\t')?;
                Some(StatusEntry {
                    name: name.to_string(),
                    pid: pid.trim().parse().ok()?,
                })
            })
            .collect()
    }

    fn write_status<'a>(
        path: &Path,
        entries: impl Iterator<Item = (&'a str, u32)>,
    ) -> ConsoleResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConsoleError::io(parent, e))?;
        }
        let mut content = String::new();
        for (name, pid) in entries {
            content.push_str(&format!("{name}\t{pid}\n"));
        }
        fs::write(path, content).map_err(|e| ConsoleError::io(path, e))
    }

    fn write_pid_file(path: &Path, pid: u32) -> ConsoleResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConsoleError::io(parent, e))?;
        }
        fs::write(path, format!("{pid}\n")).map_err(|e| ConsoleError::io(path, e))
    }

    fn remove_state_files(server: &ServerConfig) {
        let _ = fs::remove_file(&server.pid_file);
        let _ = fs::remove_file(&server.status_file);
    }

    fn pid_alive(pid: u32) -> bool {
        kill(Pid::from_raw(pid as i32), None).is_ok()
    }
}
