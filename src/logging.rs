//! Log setup.
//!
//! Diagnostics go to stderr so the report on stdout stays clean. `-d` lowers
//! the level to `debug`, `RUST_LOG` overrides both. With `--log-file` the same
//! events are also written, without colors, through a non-blocking appender.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::AppError;

const DEFAULT_LEVEL: &str = "warn";
const DEBUG_LEVEL: &str = "debug";

/// Installs the global subscriber.
///
/// The returned guard flushes the log file when dropped, keep it alive
/// until the end of `main`.
///
/// # Errors
///
/// [`AppError::Logging`] when the log file cannot be created.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { DEBUG_LEVEL } else { DEFAULT_LEVEL }));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let appender = file_appender(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Fails only when a subscriber is already installed, e.g. across tests.
    if tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("log subscriber already installed");
    }

    Ok(guard)
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, AppError> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map_or_else(|| "nes-header-decoder.log".into(), |name| name.to_string_lossy());

    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?)
}
