//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level. The terminal UI owns the
//! screen, so it always logs to a file; other commands may use stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogLevel;

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Install the global subscriber, appending to `log_file` when given and
/// writing to stderr otherwise.
///
/// # Errors
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init_logging(level: LogLevel, log_file: Option<&Path>) -> io::Result<()> {
    let registry = tracing_subscriber::registry().with(filter(level));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true);

            registry.with(file_layer).try_init().map_err(io::Error::other)?;
            info!(path = %path.display(), "Logging initialized");
        }
        None => {
            let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);
            registry.with(stderr_layer).try_init().map_err(io::Error::other)?;
        }
    }

    Ok(())
}
