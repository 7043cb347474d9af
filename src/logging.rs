//! # Logging
//!
//! Initializes the global `tracing` subscriber from [`LogConfig`]:
//! a human-readable console layer on stdout and, when enabled, a JSON layer
//! appending to the configured log file. `RUST_LOG` overrides `LOG_LEVEL`.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Error: O6FSH5 - Creating log directory {path}.")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error: O6FSH5 - Opening log file {path}.")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error: O6FSH5 - Getting logger.")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(config.level.into()));

    let console_layer = fmt::layer().with_target(true);

    let file_layer = open_log_file(config)?.map(|file| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!(level = %config.level, to_file = config.to_file, "Logger initialized");
    Ok(())
}

/// Open the JSON log file in append mode, creating its directory.
///
/// Returns `None` when file logging is disabled.
pub fn open_log_file(config: &LogConfig) -> Result<Option<File>, LoggingError> {
    if !config.to_file {
        return Ok(None);
    }

    if let Some(dir) = config.file_dir() {
        fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file_path)
        .map(Some)
        .map_err(|source| LoggingError::OpenFile {
            path: config.file_path.clone(),
            source,
        })
}
