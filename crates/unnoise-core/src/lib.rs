//! Noise-reversion orchestration for unnoise
//!
//! Ties the reference source, the working tree and the content engine
//! together: every file is compared against its committed version and
//! rewritten with formatting and comment noise reverted.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod report;

pub use cleaner::{CleanOptions, Cleaner};
pub use config::{CONFIG_FILE, Config};
pub use error::{Error, Result};
pub use report::{FileFailure, FileOutcome, FileReport, RunReport, SkipReason, Summary};
