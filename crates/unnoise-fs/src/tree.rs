//! Working-copy access for the cleaner

use walkdir::WalkDir;

use crate::{Error, GIT_DIR, NormalizedPath, Result, io};

/// Read/write access to the files the cleaner operates on.
///
/// The cleaner never touches the filesystem directly, which lets tests
/// swap in an in-memory tree.
pub trait WorkingTree {
    /// Read the raw bytes of a working-copy file.
    fn read_bytes(&self, path: &NormalizedPath) -> Result<Vec<u8>>;

    /// Replace the content of a working-copy file.
    fn write_text(&self, path: &NormalizedPath, content: &str) -> Result<()>;

    /// Check whether `path` names a regular file.
    fn is_file(&self, path: &NormalizedPath) -> bool;

    /// Check whether `path` names a directory.
    fn is_dir(&self, path: &NormalizedPath) -> bool;

    /// Check whether `path` is a symbolic link (the link itself, not its target).
    fn is_symlink(&self, path: &NormalizedPath) -> bool;

    /// Recursively list regular files under `dir`.
    ///
    /// Directories named `.git` or listed in `excluded` are not entered.
    /// Symlinks and files whose path is not valid UTF-8 are left out.
    /// Results are sorted.
    fn list_files(&self, dir: &NormalizedPath, excluded: &[String]) -> Result<Vec<NormalizedPath>>;
}

/// [`WorkingTree`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTree;

impl LocalTree {
    pub fn new() -> Self {
        Self
    }
}

impl WorkingTree for LocalTree {
    fn read_bytes(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        io::read_bytes(path)
    }

    fn write_text(&self, path: &NormalizedPath, content: &str) -> Result<()> {
        io::write_text(path, content)
    }

    fn is_file(&self, path: &NormalizedPath) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &NormalizedPath) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &NormalizedPath) -> bool {
        path.is_symlink()
    }

    fn list_files(&self, dir: &NormalizedPath, excluded: &[String]) -> Result<Vec<NormalizedPath>> {
        let root = dir.to_native();
        let mut files = Vec::new();

        let walker = WalkDir::new(&root).follow_links(false).into_iter();
        let walker = walker.filter_entry(|entry| {
            // The walk root itself is always entered
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            name != GIT_DIR && !excluded.iter().any(|ex| *ex == name)
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    return Err(Error::io(&root, source));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry during directory walk");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            match entry.path().to_str() {
                Some(path) => files.push(NormalizedPath::new(path)),
                None => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        "Skipping file with a non-UTF-8 name"
                    );
                }
            }
        }

        files.sort();
        Ok(files)
    }
}
