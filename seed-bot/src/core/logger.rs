//! Logging setup: plain-text lines teed to stderr and a log file.
//!
//! Line shape: `YYYY-MM-DD HH:MM:SS  INFO seed_bot::chat::service: message key=value`.

use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. HTTP client internals stay quiet.
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. Stdout is left to command output.
///
/// Call once, after `.env` has been loaded so `RUST_LOG` is visible.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = open_log_file(Path::new(log_file_path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr.and(std::sync::Arc::new(file)))
        .with_timer(LocalTimestamp)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}
