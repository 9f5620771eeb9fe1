//! Comment-aware normalization, line alignment and noise reversion
//!
//! Decides, region by region, whether the difference between a committed
//! file and its working copy is a real change or only formatting/comment
//! noise, and rebuilds the working text with noise regions restored.

pub mod align;
pub mod error;
pub mod normalize;
pub mod policy;
pub mod profile;

pub use align::{Region, RegionTag, align, split_lines};
pub use error::{Error, Result};
pub use normalize::{normalize, semantically_equal, strip_comments};
pub use policy::{Decision, Outcome, Reconstruction, Resolution, reconstruct, resolve};
pub use profile::{CommentGrammar, ProfileRegistry, profile_for};
