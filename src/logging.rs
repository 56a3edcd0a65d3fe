//! File logging.
//!
//! The TUI owns the terminal, so log records go to a daily rolling file under
//! the user data dir (`.../tabgrid/logs/tabgrid.log`). Filtering follows
//! `RUST_LOG` and defaults to `info`.

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "tabgrid.log";

pub fn logs_dir() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tabgrid")?;
    Some(proj.data_dir().join("logs"))
}

/// Install the global subscriber. Problems are printed and logging is skipped.
pub fn init() {
    let Some(dir) = logs_dir() else {
        eprintln!("Warning: Could not determine a log directory; logging disabled");
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!(
            "Warning: Could not create log directory {}: {}",
            dir.display(),
            e
        );
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}
