//! Error types for style operations

use std::path::PathBuf;
use stylegrid_config::ConfigError;
use stylegrid_directory::DirectoryError;
use thiserror::Error;

/// Errors returned by style operations.
///
/// Scanning never produces these for individual files; unreadable sources are
/// logged and skipped. Errors surface from explicit operations (save, delete,
/// state persistence) and from invalid caller input.
#[derive(Error, Debug)]
pub enum StyleError {
    /// A required input was missing or malformed
    #[error("invalid {field}: {message}")]
    InvalidInput {
        /// Name of the offending input field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// No style with this name exists in the targeted sources
    #[error("style '{name}' not found")]
    StyleNotFound {
        /// The requested style name
        name: String,
    },

    /// No discovered source carries this label
    #[error("source '{label}' not found")]
    SourceNotFound {
        /// The requested source label
        label: String,
    },

    /// CSV could not be parsed or written
    #[error("CSV error in '{path}': {source}")]
    Csv {
        /// File being processed
        path: PathBuf,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// File content is not valid UTF-8
    #[error("'{path}' is not valid UTF-8")]
    Encoding {
        /// File being read
        path: PathBuf,
    },

    /// Failed to read a file
    #[error("failed to read '{path}': {source}")]
    FileRead {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write '{path}': {source}")]
    FileWrite {
        /// File being written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize persisted state
    #[error("failed to serialize '{path}': {source}")]
    Json {
        /// File being written
        path: PathBuf,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// Directory resolution failed
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StyleError {
    /// Create an InvalidInput error.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a FileRead error.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a FileWrite error.
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a Csv error.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
