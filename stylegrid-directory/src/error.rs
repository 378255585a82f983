//! Errors raised while preparing a state directory.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Why a state directory could not be prepared.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// No `.git` entry in the current directory or any parent.
    #[error("no git repository above the current directory")]
    NotInGitRepository,

    /// The current directory could not be read.
    #[error("cannot read the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// The state directory or one of its folders could not be created.
    #[error("cannot create folder '{path}': {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state directory's `.gitignore` could not be written.
    #[error("cannot write '{path}': {source}")]
    WriteGitignore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
