//! # matriz-logging
//!
//! Logging for the matriz research-matrix wizard.
//!
//! ## Key Types
//!
//! - [`Logger`] - Structured wizard event logging
//! - [`LogEvent`] - Log event types
//! - [`LogFormat`] - Output formats (Pretty, JSON, Compact)
//!
//! While the terminal UI owns the screen, console output is muted with
//! [`Logger::set_console`] and events only reach the JSONL file, if one is
//! configured. [`init_tracing`] writes `tracing` output to a file for the
//! same reason.

mod events;

pub use events::{LogEvent, LogFormat, Logger};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name used for `tracing` output when a log directory is given
pub const TRACE_FILE_NAME: &str = "matriz.log";

/// Initialize tracing for the application.
///
/// With `log_dir` set, output is written to `<log_dir>/matriz.log` through a
/// non-blocking writer and the returned guard must be kept alive until exit.
/// Without it, output goes to stderr.
pub fn init_tracing(
    level: &str,
    format: LogFormat,
    log_dir: Option<&Path>,
) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, TRACE_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    match format {
        LogFormat::Json => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(false).with_writer(writer))
                .try_init();
        }
        LogFormat::Pretty | LogFormat::Compact => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(log_dir.is_none())
                        .with_writer(writer),
                )
                .try_init();
        }
    }

    guard
}
