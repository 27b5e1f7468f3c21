use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};

use grid_stress::app::{INTERRUPT_MESSAGE, StressController};
use grid_stress::config::{Cli, StressConfig};
use grid_stress::launch::{CancelToken, ProcessLauncher};
use grid_stress::platform::console::install_interrupt_handler;
use grid_stress::platform::monitors::SystemDisplays;
use grid_stress::utils::logger::init_logger;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StressConfig::resolve(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let _logger = match init_logger(&config.log_level) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("failed to start logger: {err}");
            return ExitCode::from(2);
        }
    };

    let cancel = CancelToken::new();
    if let Err(err) = install_interrupt_handler(cancel.clone()) {
        warn!("Ctrl+C will not be handled: {}", err);
    }

    info!(
        "Starting {}x{} stress run with {}",
        config.rows,
        config.cols,
        config.executable.display()
    );

    let launcher = Arc::new(ProcessLauncher::new(config.executable.clone()));
    let controller = StressController::new(config, Box::new(SystemDisplays), launcher, cancel);

    match controller.run() {
        Ok(report) if report.has_failures() => {
            error!("{} of {} launches failed", report.summary.failed, report.planned);
            ExitCode::FAILURE
        }
        Ok(report) => {
            info!("Done: {} windows across {} monitors", report.planned, report.monitors);
            ExitCode::SUCCESS
        }
        Err(err) if err.is_interrupt() => {
            println!("\n{INTERRUPT_MESSAGE}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
