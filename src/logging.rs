use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

/// Send `tracing` output to `<dir>/<file_name>`.
///
/// The terminal belongs to the renderer, so nothing is logged to stdout. Keep
/// the returned guard alive for as long as logs should be flushed.
pub fn init_file_logging(dir: &Path, file_name: &str, verbose: bool) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}
