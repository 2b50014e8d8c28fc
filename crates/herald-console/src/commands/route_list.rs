//! `route:list`: render the configured route table.

use crate::console::{CommandInput, ConsoleOutput};
use crate::declare_command;
use crate::exit_codes;
use crate::registry::ConsoleCommand;

#[derive(Default)]
pub struct RouteListCommand;

declare_command!(
    RouteListCommand,
    name = "route:list",
    description = "Route list"
);

impl ConsoleCommand for RouteListCommand {
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(super::config_arg())
    }

    fn execute(
        &self,
        input: &CommandInput<'_>,
        output: &mut ConsoleOutput,
    ) -> anyhow::Result<i32> {
        let config = super::load_config(input)?;

        let mut rows = Vec::new();
        for route in &config.routes {
            // One row per (route, method) pair.
            for method in &route.methods {
                let middleware = if route.middleware.is_empty() {
                    "null".to_string()
                } else {
                    serde_json::to_string(&route.middleware)?
                };
                rows.push(vec![
                    route.path.clone(),
                    method.clone(),
                    route.handler.clone(),
                    middleware,
                    route.name.clone().unwrap_or_default(),
                ]);
            }
        }

        output.table(&["uri", "method", "callback", "middleware", "name"], &rows);
        Ok(exit_codes::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn renders_one_row_per_route_method() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("herald.yaml");
        fs::write(
            &path,
            r#"
routes:
  - path: /users
    methods: [GET, POST]
    handler: users::index
    middleware: [auth]
    name: users
"#,
        )
        .unwrap();

        let cmd = RouteListCommand;
        let definition = cmd.configure(clap::Command::new("route:list"));
        let matches =
            definition.get_matches_from(["route:list", "--config", path.to_str().unwrap()]);
        let input = CommandInput::new(&matches);
        let mut output = ConsoleOutput::buffer();

        let code = cmd.execute(&input, &mut output).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let rendered = output.captured();
        let data_rows: Vec<_> = rendered
            .lines()
            .filter(|l| l.starts_with("/users"))
            .collect();
        assert_eq!(data_rows.len(), 2);
        assert!(data_rows[0].contains("GET"));
        assert!(data_rows[1].contains("POST"));
        assert!(data_rows[0].contains(r#"["auth"]"#));
    }
}
