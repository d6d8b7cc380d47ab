//! apcmd - a dual-pane file browser for the terminal

use std::io;
use std::process::ExitCode;

mod config;
mod errors;
mod input;
mod logging;
mod ops;
mod repo;
mod signal;
mod state;
mod ui;

use config::Config;
use repo::LocalRepo;
use state::App;
use ui::terminal::{restore_terminal, setup_panic_hook, TuiFrontend};

fn run(config: Config) -> io::Result<Result<(), errors::AppError>> {
    let mut frontend = TuiFrontend::new(config.general.poll_interval())?;
    let left = Box::new(LocalRepo::new(config.general.left_path.clone()));
    let right = Box::new(LocalRepo::new(config.general.right_path.clone()));
    let mut app = App::new(config, left, right);

    let result = app.run(&mut frontend);
    drop(frontend);
    restore_terminal()?;
    Ok(result)
}

fn main() -> ExitCode {
    let config = Config::load();
    let _log_guard = logging::init(&config.logging, config.log_directory().as_deref());
    signal::install();
    setup_panic_hook();

    match run(config) {
        Ok(Ok(())) => {
            tracing::info!("exiting");
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "terminated");
            eprintln!("apc: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            let _ = restore_terminal();
            tracing::error!(error = %e, "terminal failure");
            eprintln!("apc: terminal error: {}", e);
            ExitCode::FAILURE
        }
    }
}
