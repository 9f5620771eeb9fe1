//! Committed ("reference") file content

use std::path::Path;

use git2::{ErrorCode, ObjectType, Oid, Repository};
use unnoise_fs::NormalizedPath;

use crate::root::workdir_of;
use crate::{Error, Result};

/// Revision used when none is configured.
pub const DEFAULT_REVISION: &str = "HEAD";

/// Source of the committed version of a working-copy file.
pub trait ReferenceSource {
    /// Fetch the committed bytes for `path`.
    ///
    /// Returns `Ok(None)` when the path is not tracked at the reference
    /// revision. Callers treat errors the same way.
    fn reference_content(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>>;
}

/// [`ReferenceSource`] reading blobs from a git revision with `git2`.
pub struct GitReference {
    repo: Repository,
    root: NormalizedPath,
    revision: String,
    /// Tree of the resolved revision; `None` when it does not resolve
    /// (for example an unborn `HEAD`), in which case nothing is tracked.
    tree_id: Option<Oid>,
}

impl GitReference {
    /// Open the repository containing `start` and resolve `revision`.
    pub fn discover(start: &NormalizedPath, revision: &str) -> Result<Self> {
        let repo = Repository::discover(start.to_native()).map_err(|e| {
            tracing::debug!(path = %start, error = %e, "Repository discovery failed");
            Error::RootNotFound {
                path: start.to_native(),
            }
        })?;
        Self::from_repository(repo, revision)
    }

    /// Wrap an already opened repository.
    pub fn from_repository(repo: Repository, revision: &str) -> Result<Self> {
        let root = workdir_of(&repo)?;

        let tree_id = match repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_tree())
        {
            Ok(tree) => Some(tree.id()),
            Err(e) => {
                tracing::warn!(
                    revision = %revision,
                    error = %e,
                    "Reference revision does not resolve; no file will be treated as tracked"
                );
                None
            }
        };

        Ok(Self {
            repo,
            root,
            revision: revision.to_string(),
            tree_id,
        })
    }

    /// Canonical work tree root.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Revision the reference content is read from.
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Path of `path` relative to the work tree, in git's slash form.
    ///
    /// Only the parent directory is resolved; a symlink in the final
    /// component names the link itself, not its target.
    pub fn repo_relative(&self, path: &NormalizedPath) -> Result<NormalizedPath> {
        let native = path.to_native();
        let absolute = if native.is_absolute() {
            native
        } else {
            std::env::current_dir()
                .map_err(|e| unnoise_fs::Error::io(path.to_native(), e))?
                .join(native)
        };

        let resolved = match (absolute.parent(), absolute.file_name()) {
            (Some(parent), Some(name)) => {
                let parent = NormalizedPath::new(parent);
                parent
                    .canonicalize()
                    .unwrap_or(parent)
                    .join(&name.to_string_lossy())
            }
            _ => {
                let whole = NormalizedPath::new(&absolute);
                whole.canonicalize().unwrap_or(whole)
            }
        };

        resolved
            .relative_to(&self.root)
            .filter(|rel| !rel.as_str().is_empty())
            .ok_or_else(|| Error::OutsideWorkTree {
                path: path.to_native(),
            })
    }
}

impl ReferenceSource for GitReference {
    fn reference_content(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        let Some(tree_id) = self.tree_id else {
            return Ok(None);
        };
        let relative = self.repo_relative(path)?;

        let tree = self.repo.find_tree(tree_id)?;
        let entry = match tree.get_path(Path::new(relative.as_str())) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Submodule commits and directories have no blob content
        if entry.kind() != Some(ObjectType::Blob) {
            return Ok(None);
        }

        let blob = self.repo.find_blob(entry.id())?;
        Ok(Some(blob.content().to_vec()))
    }
}

impl std::fmt::Debug for GitReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitReference")
            .field("root", &self.root)
            .field("revision", &self.revision)
            .field("tree_id", &self.tree_id)
            .finish()
    }
}
