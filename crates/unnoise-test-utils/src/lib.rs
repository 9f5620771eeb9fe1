//! Shared test utilities for the unnoise workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures
//! - [`repo`]: [`repo::TestRepo`] builder for committed/working file scenarios

pub mod git;
pub mod repo;
