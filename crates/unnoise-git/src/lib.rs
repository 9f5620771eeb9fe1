//! Git abstraction for unnoise
//!
//! Locates the repository that owns the working files and serves the
//! committed ("reference") content each file is compared against.

pub mod error;
pub mod reference;
pub mod root;

pub use error::{Error, Result};
pub use reference::{DEFAULT_REVISION, GitReference, ReferenceSource};
pub use root::discover_root;
