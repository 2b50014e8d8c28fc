use std::path::Path;

use herald_console::{exit_codes, ConsoleApp};

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::CONFIG_ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> anyhow::Result<i32> {
    let mut app = ConsoleApp::new("herald")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Herald console: worker supervision and project commands");
    app.install_internal_commands()?;

    // Project-local command tree, registered by convention when present.
    let app_commands = Path::new("app/commands");
    if app_commands.is_dir() {
        app.install_commands(app_commands, "app::commands")?;
    }

    Ok(app.run_from(std::env::args_os()))
}
