//! Diagnostic logging via `tracing`.
//!
//! Clipboard failures and catalog anomalies are reported here rather than
//! through the UI. While the terminal is in raw mode any write to
//! stderr would corrupt the display, so interactive runs only log when a
//! log file is configured; the non-interactive subcommands log to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Where diagnostic output should go.
#[derive(Debug)]
pub enum LogTarget<'a> {
    /// Append to a log file (safe while the TUI owns the terminal).
    File(&'a Path),
    /// Write to stderr (non-interactive modes only).
    Stderr,
    /// Discard everything; no subscriber is installed.
    None,
}

/// Install the global tracing subscriber.
///
/// Verbosity maps `-v` counts to levels: 0 = info, 1 = debug, 2+ = trace,
/// with `RUST_LOG` taking precedence when set.
pub fn init(target: LogTarget<'_>, verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,querydocs={level}")));

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .without_time()
                .init();
        }
        LogTarget::None => {}
    }
    Ok(())
}
