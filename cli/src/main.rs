mod commands;
mod export;
mod report;
mod terminal;

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use commands::CommandLine;
use report::ConsoleReporter;
use terminal::{logging, print};
use tracing::error;
use whoshere_common::error::Error;
use whoshere_core::orchestrator::Orchestrator;
use whoshere_core::platform::Platform;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init();
    print::banner();

    let platform = match Platform::detect() {
        Ok(platform) => platform,
        Err(e) => return fatal(&e),
    };
    if let Err(e) = platform.ensure_privileged() {
        return fatal(&e);
    }

    let cfg = commands.resolve_config();

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handle = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop_handle.store(true, Ordering::Relaxed);
        }
    });

    let reporter = ConsoleReporter::new(&cfg.log_dir);
    let mut orchestrator = Orchestrator::new(cfg, platform, reporter, stop);

    match orchestrator.run().await {
        Ok(()) => {
            print::end_of_run();
            ExitCode::SUCCESS
        }
        Err(e) => fatal(&e),
    }
}

fn fatal(err: &Error) -> ExitCode {
    error!("[Fatal] {err}");
    ExitCode::FAILURE
}
