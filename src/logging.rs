use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console and daily-rolling JSON file logging.
///
/// `RUST_LOG` overrides the default `mind_catalog=info` filter. The returned
/// guard flushes the file writer when dropped, so keep it alive for the
/// lifetime of the process.
pub fn init_logging(log_dir: impl AsRef<Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mind_catalog=info"));

    // Console-only if the log directory can't be created
    if fs::create_dir_all(log_dir.as_ref()).is_err() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(log_dir.as_ref(), "mind_catalog.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    // stderr keeps stdout clean for `json` output
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Some(guard)
}
