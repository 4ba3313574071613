//! Error types for the scraper and its command line front end.

use std::path::PathBuf;

use fontscope_net::NetworkError;
use thiserror::Error;

/// Errors raised while configuring a scan or writing its results.
///
/// Problems met while scanning a site are not errors at this level: they are
/// recorded as strings in the scan result and the scan carries on.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client could not be built.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding failed.
    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding failed.
    #[error("failed to encode CSV output: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for scraper operations.
pub type Result<T> = std::result::Result<T, Error>;
