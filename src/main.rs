mod app;
mod cli;
mod config;
mod display;
mod errors;
mod lifecycle;
mod logging;
mod panel;
mod rotation;
mod scheduler;
mod screen_factory;
mod screens;
mod system_info;

use std::process::ExitCode;

use tracing::{error, info};

use crate::app::Application;
use crate::cli::CliParser;

fn main() -> ExitCode {
    let options = CliParser::parse();

    if let Err(e) = logging::init(options.debug) {
        eprintln!("{}", e);
    }

    if let Err(e) = lifecycle::install_signal_handlers() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("Status panel starting");
    match Application::new(options).run() {
        Ok(()) => {
            info!("Status panel stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
