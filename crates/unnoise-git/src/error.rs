//! Error types for unnoise-git

use std::path::PathBuf;

/// Result type for unnoise-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in unnoise-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] unnoise_fs::Error),

    #[error("Not inside a git repository: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Repository at {path} has no working tree")]
    BareRepository { path: PathBuf },

    #[error("Path {path} is outside the work tree")]
    OutsideWorkTree { path: PathBuf },
}
