//! `nes-header-decoder [flags] [file]`
//!
//! Prints the fields of an iNES header and what they mean.

mod config;
mod driver;
mod error;
mod logging;
mod report;

use std::io;
use std::process::ExitCode;

use config::{Config, SHORT_USAGE};
use error::AppError;

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    let _guard = match logging::init(config.debug, config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => return fail(&e),
    };

    let stdout = io::stdout();
    match driver::run(&config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(e: &AppError) -> ExitCode {
    match e {
        // clap already formats its own diagnostics.
        AppError::Usage(usage) => eprint!("{usage}"),
        _ => eprintln!("** ERROR: {e}"),
    }
    if e.wants_usage() {
        eprintln!("{SHORT_USAGE}");
    }
    tracing::debug!("exiting with status {}", e.exit_code());

    ExitCode::from(e.exit_code())
}
