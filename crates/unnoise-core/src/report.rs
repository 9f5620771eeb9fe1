//! Per-file outcomes and run reports

use serde::{Deserialize, Serialize};
use unnoise_fs::NormalizedPath;

/// Why a file was left untouched without being examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Not present at the reference revision (or the lookup failed)
    #[serde(rename = "not-tracked")]
    NotTracked,
    /// No such working-copy file
    #[serde(rename = "not-found")]
    NotFound,
    /// Working copy is not valid UTF-8 text
    #[serde(rename = "binary-or-undecodable")]
    Undecodable,
    /// Path is a symbolic link
    #[serde(rename = "symlink")]
    Symlink,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotTracked => "not-tracked",
            Self::NotFound => "not-found",
            Self::Undecodable => "binary-or-undecodable",
            Self::Symlink => "symlink",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of examining one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: NormalizedPath,
    /// Whether the file was (or, in dry-run mode, would be) rewritten
    pub rewritten: bool,
    /// Regions or lines reverted to the reference text
    pub reversions: usize,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FileOutcome {
    Processed(FileReport),
    Skipped {
        path: NormalizedPath,
        reason: SkipReason,
    },
}

impl FileOutcome {
    pub(crate) fn processed(path: &NormalizedPath, rewritten: bool, reversions: usize) -> Self {
        Self::Processed(FileReport {
            path: path.clone(),
            rewritten,
            reversions,
        })
    }

    pub(crate) fn skipped(path: &NormalizedPath, reason: SkipReason) -> Self {
        Self::Skipped {
            path: path.clone(),
            reason,
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        match self {
            Self::Processed(report) => &report.path,
            Self::Skipped { path, .. } => path,
        }
    }

    /// Reversions made, zero for skipped files.
    pub fn reversions(&self) -> usize {
        match self {
            Self::Processed(report) => report.reversions,
            Self::Skipped { .. } => 0,
        }
    }

    pub fn is_rewritten(&self) -> bool {
        matches!(self, Self::Processed(report) if report.rewritten)
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped { reason, .. } => Some(*reason),
            Self::Processed(_) => None,
        }
    }
}

/// A file whose processing failed; siblings are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: NormalizedPath,
    pub error: String,
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub files: usize,
    pub rewritten: usize,
    pub skipped: usize,
    pub failed: usize,
    pub reversions: usize,
}

/// Report for a whole invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Find the outcome recorded for `path`.
    pub fn outcome_for(&self, path: &NormalizedPath) -> Option<&FileOutcome> {
        self.files.iter().find(|outcome| outcome.path() == path)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            files: self.files.len() + self.failures.len(),
            rewritten: self.files.iter().filter(|o| o.is_rewritten()).count(),
            skipped: self
                .files
                .iter()
                .filter(|o| o.skip_reason().is_some())
                .count(),
            failed: self.failures.len(),
            reversions: self.files.iter().map(FileOutcome::reversions).sum(),
        }
    }
}
