//! Error types for unnoise-core

use std::path::PathBuf;

/// Result type for unnoise-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in unnoise-core operations
///
/// Conditions that only skip a file (untracked, missing, binary) are not
/// errors; see [`crate::SkipReason`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No git repository contains the starting directory
    #[error("Not in a git repository: {path}")]
    VcsRootNotFound { path: PathBuf },

    /// The cleaned content could not be written back
    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: unnoise_fs::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: unnoise_content::Error,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from unnoise-fs
    #[error(transparent)]
    Fs(#[from] unnoise_fs::Error),

    /// Git error from unnoise-git
    #[error(transparent)]
    Git(#[from] unnoise_git::Error),
}
