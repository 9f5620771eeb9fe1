//! Repository root discovery

use git2::Repository;
use unnoise_fs::NormalizedPath;

use crate::{Error, Result};

/// Find the work tree root of the repository containing `start`.
///
/// Walks upward like `git rev-parse --show-toplevel`. The returned path is
/// canonical so it can be compared against canonicalized file paths.
pub fn discover_root(start: &NormalizedPath) -> Result<NormalizedPath> {
    let repo = Repository::discover(start.to_native()).map_err(|e| {
        tracing::debug!(path = %start, error = %e, "Repository discovery failed");
        Error::RootNotFound {
            path: start.to_native(),
        }
    })?;
    workdir_of(&repo)
}

/// Canonical work tree path of an open repository.
pub(crate) fn workdir_of(repo: &Repository) -> Result<NormalizedPath> {
    let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
        path: repo.path().to_path_buf(),
    })?;
    Ok(NormalizedPath::new(workdir).canonicalize()?)
}
