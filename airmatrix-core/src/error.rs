//! Error types for airmatrix-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from persisting the plugin config. Loading never errors; read and
/// parse failures collapse to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure on the save path (disk full, permissions).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (write path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
