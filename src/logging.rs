//! File logging. The TUI owns the terminal, so nothing is ever written to
//! stdout/stderr while a session is on screen.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Installs a global subscriber writing to `path`. Keep the returned guard
/// alive for the whole run so buffered lines get flushed on exit.
pub fn init_file_logging(path: &Path, level: &str) -> Result<WorkerGuard> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::Logging(format!("not a file path: {}", path.display())))?;

    fs::create_dir_all(dir)
        .map_err(|e| AppError::Logging(format!("{}: {}", dir.display(), e)))?;

    let filter = EnvFilter::try_new(level)
        .map_err(|e| AppError::Logging(format!("bad log level '{}': {}", level, e)))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
