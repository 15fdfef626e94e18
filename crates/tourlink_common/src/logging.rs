//! Logging utilities for the Tourlink application.
//!
//! Every binary calls [`init`] once with the `[logging]` section of the
//! configuration. `RUST_LOG` takes precedence over the configured level.

use tourlink_config::LoggingConfig;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "tourlink.log";

/// Builds the default filter directives for a level such as `info` or `debug`.
///
/// Dependencies stay at `warn`; our crates and `tower_http` request traces use
/// the configured level.
pub fn default_directives(level: &str) -> String {
    format!("warn,tourlink={level},tower_http={level}")
}

/// Initialize the tracing subscriber.
///
/// Logs go to stdout and, when `file_dir` is configured, to a daily rolling
/// file. The returned guard flushes the file writer and must be held for the
/// life of the process.
///
/// # Examples
///
/// ```
/// use tourlink_common::logging;
/// use tourlink_config::LoggingConfig;
///
/// let _guard = logging::init(&LoggingConfig::default());
/// ```
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let (file_layer, guard) = match config.file_dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: tests and embedded use may already have set a subscriber
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", config.level);
    }
    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
