//! Error types for treeloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a source tree
#[derive(Error, Debug)]
pub enum TreelocError {
    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File content is not valid UTF-8 text
    #[error("file is not valid UTF-8 text: {path}")]
    FileDecode { path: PathBuf },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Scan root is a file, not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory traversal failed
    #[error("failed to walk directory tree: {0}")]
    Walk(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<walkdir::Error> for TreelocError {
    fn from(err: walkdir::Error) -> Self {
        match err.path() {
            Some(path) => TreelocError::Walk(format!("{}: {}", path.display(), err)),
            None => TreelocError::Walk(err.to_string()),
        }
    }
}
