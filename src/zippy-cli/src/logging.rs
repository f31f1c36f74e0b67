//! File logging.
//!
//! The reader owns the terminal, so log output never goes to stdout or
//! stderr. When a log file is configured, a non-blocking writer appends to
//! it until the returned [`LogGuard`] is dropped.

use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::LogLevel;

/// Keeps the background log writer alive. Flushes on drop.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Filter directive to use: `RUST_LOG` when set and non-empty, the
/// configured level otherwise.
pub fn filter_directive(level: LogLevel, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => level.as_filter_str().to_string(),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Install the global subscriber writing to `path`.
pub fn init_file_logging(path: &Path, level: LogLevel) -> Result<LogGuard> {
    let file = open_log_file(path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(level, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter {directive:?}"))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::info!(
        "zippy {} logging at {}",
        env!("CARGO_PKG_VERSION"),
        directive
    );
    Ok(LogGuard { _guard: guard })
}
