//! [`TestRepo`] builder for committed-versus-working file scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use tempfile::TempDir;

use crate::git::{commit_all, real_git_repo};

/// A temporary git repository with helpers to commit a reference version of
/// files and then edit the working copy.
///
/// # Example
///
/// ```rust,no_run
/// use unnoise_test_utils::repo::TestRepo;
///
/// let repo = TestRepo::new();
/// repo.write("app.py", "x = 1\n");
/// repo.commit("initial");
/// repo.write("app.py", "x  =  1\n");
/// repo.assert_file_eq("app.py", "x  =  1\n");
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
    repo: Repository,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    /// Create an empty repository in a temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let repo = real_git_repo(temp_dir.path());
        Self { temp_dir, repo }
    }

    /// Return the root path of the work tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the work tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// The underlying `git2` repository.
    pub fn git(&self) -> &Repository {
        &self.repo
    }

    /// Write a text file, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        self.write_bytes(rel, content.as_bytes());
    }

    /// Write raw bytes, creating parent directories.
    pub fn write_bytes(&self, rel: &str, content: &[u8]) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestRepo::write: {}: {e}", path.display()));
    }

    /// Commit every file currently in the work tree.
    pub fn commit(&self, message: &str) -> git2::Oid {
        commit_all(&self.repo, message)
    }

    /// Read a working-copy file as text.
    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that the working copy of `rel` is exactly `expected`.
    ///
    /// # Panics
    /// Panics with both contents if they differ.
    pub fn assert_file_eq(&self, rel: &str, expected: &str) {
        let actual = self.read(rel);
        assert!(
            actual == expected,
            "File {} differs.\nExpected: {:?}\nActual: {:?}",
            rel,
            expected,
            actual
        );
    }

    /// Assert that the working copy of `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read(rel);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            file_content
        );
    }
}
