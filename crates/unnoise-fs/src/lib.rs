//! Filesystem abstraction for unnoise
//!
//! Provides normalized paths, atomic writes, recursive file listing and
//! the [`WorkingTree`] collaborator used by the cleaner.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod tree;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use tree::{LocalTree, WorkingTree};

/// Version-control metadata directory that directory walks never enter.
pub const GIT_DIR: &str = ".git";
