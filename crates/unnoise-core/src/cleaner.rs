//! Cleaner: reverts noise in working-copy files
//!
//! For each file the cleaner fetches the committed version, aligns it with
//! the working copy, and writes back the working copy with every
//! noise-only region restored to its committed text.

use unnoise_content::{ProfileRegistry, reconstruct};
use unnoise_fs::{LocalTree, NormalizedPath, WorkingTree};
use unnoise_git::{GitReference, ReferenceSource, discover_root};

use crate::config::Config;
use crate::report::{FileFailure, FileOutcome, RunReport, SkipReason};
use crate::{Error, Result};

/// Options for a cleaning run
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// If true, report what would change without writing anything
    pub dry_run: bool,
    /// Revision to compare against; overrides the configuration file
    pub revision: Option<String>,
    /// Extra directory names to skip during directory walks
    pub exclude_dirs: Vec<String>,
    /// Explicit configuration file instead of `.unnoise.toml` at the root
    pub config_path: Option<NormalizedPath>,
}

/// Reverts formatting and comment noise against a reference source.
pub struct Cleaner<R, W> {
    reference: R,
    tree: W,
    registry: ProfileRegistry,
    dry_run: bool,
    exclude_dirs: Vec<String>,
}

impl Cleaner<GitReference, LocalTree> {
    /// Open a cleaner for the git repository containing `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VcsRootNotFound`] when `start` is not inside a git
    /// work tree, and a configuration error when the configuration file is
    /// unreadable or names an unknown grammar.
    pub fn open(start: &NormalizedPath, options: CleanOptions) -> Result<Self> {
        let root = discover_root(start).map_err(|e| {
            tracing::debug!(path = %start, error = %e, "No repository root found");
            Error::VcsRootNotFound {
                path: start.to_native(),
            }
        })?;

        let config = match &options.config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load(&root)?,
        };
        let registry = config.registry()?;
        let revision = options
            .revision
            .as_deref()
            .unwrap_or_else(|| config.revision());

        tracing::debug!(root = %root, revision = %revision, "Opening reference");
        let reference = GitReference::discover(&root, revision)?;

        let mut exclude_dirs = config.exclude_dirs;
        exclude_dirs.extend(options.exclude_dirs);

        Ok(Cleaner::new(reference, LocalTree::new(), registry)
            .with_dry_run(options.dry_run)
            .with_exclude_dirs(exclude_dirs))
    }
}

impl<R: ReferenceSource, W: WorkingTree> Cleaner<R, W> {
    pub fn new(reference: R, tree: W, registry: ProfileRegistry) -> Self {
        Self {
            reference,
            tree,
            registry,
            dry_run: false,
            exclude_dirs: Vec::new(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_exclude_dirs(mut self, exclude_dirs: Vec<String>) -> Self {
        self.exclude_dirs = exclude_dirs;
        self
    }

    /// Clean one file.
    ///
    /// Symlinks, missing, untracked and undecodable files are reported as
    /// skipped. Symlinks are never followed or rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error when the working copy cannot be read for a reason
    /// other than absence, or when the cleaned content cannot be written.
    pub fn process_file(&self, path: &NormalizedPath) -> Result<FileOutcome> {
        if self.tree.is_symlink(path) {
            return Ok(self.skip(path, SkipReason::Symlink));
        }
        if !self.tree.is_file(path) {
            return Ok(self.skip(path, SkipReason::NotFound));
        }

        let reference = match self.reference.reference_content(path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(self.skip(path, SkipReason::NotTracked)),
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Reference lookup failed");
                return Ok(self.skip(path, SkipReason::NotTracked));
            }
        };

        let working = match self.tree.read_bytes(path) {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => return Ok(self.skip(path, SkipReason::NotFound)),
            Err(e) => return Err(e.into()),
        };
        let Ok(working) = String::from_utf8(working) else {
            return Ok(self.skip(path, SkipReason::Undecodable));
        };
        let reference = String::from_utf8_lossy(&reference);

        let profile = self.registry.profile_for_extension(path.extension());
        let result = reconstruct(&reference, &working, profile);

        if result.reversions == 0 {
            tracing::debug!(path = %path, "No noise found");
            return Ok(FileOutcome::processed(path, false, 0));
        }
        if result.content == working {
            tracing::info!(path = %path, "Cleaned content identical to working copy");
            return Ok(FileOutcome::processed(path, false, result.reversions));
        }

        if self.dry_run {
            tracing::info!(path = %path, reversions = result.reversions, "[dry-run] Would rewrite");
        } else {
            self.tree
                .write_text(path, &result.content)
                .map_err(|source| Error::WriteFailure {
                    path: path.to_native(),
                    source,
                })?;
            tracing::info!(path = %path, reversions = result.reversions, "Rewrote file");
        }

        Ok(FileOutcome::processed(path, true, result.reversions))
    }

    /// Clean every file named by `paths`, descending into directories.
    ///
    /// A failure on one file is recorded and never stops the others.
    pub fn process_paths(&self, paths: &[NormalizedPath]) -> RunReport {
        let mut report = RunReport::new(self.dry_run);

        for path in paths {
            if self.tree.is_dir(path) {
                match self.tree.list_files(path, &self.exclude_dirs) {
                    Ok(files) => {
                        for file in &files {
                            self.record(file, &mut report);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(path = %path, error = %e, "Failed to list directory");
                        report.failures.push(FileFailure {
                            path: path.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            } else {
                self.record(path, &mut report);
            }
        }

        report
    }

    fn record(&self, path: &NormalizedPath, report: &mut RunReport) {
        match self.process_file(path) {
            Ok(outcome) => report.files.push(outcome),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to clean file");
                report.failures.push(FileFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    fn skip(&self, path: &NormalizedPath, reason: SkipReason) -> FileOutcome {
        tracing::debug!(path = %path, reason = %reason, "Skipping file");
        FileOutcome::skipped(path, reason)
    }
}
