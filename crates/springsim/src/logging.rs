//! Log subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
//! Interactive runs log to a file so output never lands on the canvas.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened for appending.
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        /// Path that was tried.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Builds the level filter for `config`.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level().as_directive()))
}

/// Installs the global subscriber and returns the log file in use, if any.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(config: &Config) -> Result<Option<PathBuf>, LoggingError> {
    let filter = env_filter(config);

    match config.effective_log_file() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LoggingError::OpenFile {
                    path: path.clone(),
                    source,
                })?;

            fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .try_init()
                .map_err(|err| LoggingError::Install(err.to_string()))?;
            Ok(Some(path))
        }
        None => {
            fmt()
                .with_writer(io::stderr)
                .with_env_filter(filter)
                .with_target(false)
                .try_init()
                .map_err(|err| LoggingError::Install(err.to_string()))?;
            Ok(None)
        }
    }
}
