//! Error types for cargo-retarget.
//!
//! All operations return `Result<T>` which aliases `Result<T, RetargetError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from manifest retargeting.
#[derive(Debug, Error)]
pub enum RetargetError {
    /// A manifest or fragment file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest or fragment is not valid TOML.
    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },

    /// Downloading the remote manifest failed before a response arrived.
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    /// The server answered the download with an error status.
    ///
    /// Usually a revision that does not exist; never falls back to a staged
    /// manifest.
    #[error("Failed to download {url}: HTTP {code}")]
    HttpStatus { url: String, code: u16 },

    /// A dependency table carries a `path` that is not a string.
    #[error("Dependency '{0}' has a non-string `path` value")]
    InvalidPath(String),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for cargo-retarget operations.
pub type Result<T> = std::result::Result<T, RetargetError>;
