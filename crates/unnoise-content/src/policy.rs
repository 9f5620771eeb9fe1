//! Reversion policy: which side of each aligned region to keep

use crate::align::{Region, RegionTag, align, split_lines};
use crate::normalize::semantically_equal;
use crate::profile::CommentGrammar;

/// What to do with one region or one line pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    KeepWorking,
    RestoreReference,
}

/// How a region was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Equal region, nothing to decide
    Unchanged,
    /// One decision for the whole region
    Whole(Decision),
    /// Equal-length replace resolved pair by pair
    PerLine(Vec<Decision>),
}

/// Chosen lines for a region plus the number of reversions made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub lines: Vec<&'a str>,
    pub reversions: usize,
    pub outcome: Outcome,
}

/// Resolve one region.
///
/// 1. Equal regions keep the reference lines.
/// 2. Otherwise, if both sides have the same signature the reference lines
///    are restored.
/// 3. Otherwise an equal-length replace is resolved line by line with the
///    same signature test.
/// 4. Otherwise the working lines are kept.
///
/// A reversion is counted only when the restored text differs byte-wise
/// from the working text it replaces.
pub fn resolve<'a>(region: &Region<'a>, profile: Option<CommentGrammar>) -> Resolution<'a> {
    if region.tag == RegionTag::Equal {
        return Resolution {
            lines: region.reference.to_vec(),
            reversions: 0,
            outcome: Outcome::Unchanged,
        };
    }

    let reference = region.reference.concat();
    let working = region.working.concat();

    if semantically_equal(&reference, &working, profile) {
        return Resolution {
            lines: region.reference.to_vec(),
            reversions: usize::from(reference != working),
            outcome: Outcome::Whole(Decision::RestoreReference),
        };
    }

    if region.tag == RegionTag::Replace && region.reference.len() == region.working.len() {
        return resolve_per_line(region, profile);
    }

    Resolution {
        lines: region.working.to_vec(),
        reversions: 0,
        outcome: Outcome::Whole(Decision::KeepWorking),
    }
}

fn resolve_per_line<'a>(region: &Region<'a>, profile: Option<CommentGrammar>) -> Resolution<'a> {
    let mut lines = Vec::with_capacity(region.working.len());
    let mut decisions = Vec::with_capacity(region.working.len());
    let mut reversions = 0;

    for (&reference, &working) in region.reference.iter().zip(region.working) {
        if semantically_equal(reference, working, profile) {
            if reference != working {
                reversions += 1;
            }
            lines.push(reference);
            decisions.push(Decision::RestoreReference);
        } else {
            lines.push(working);
            decisions.push(Decision::KeepWorking);
        }
    }

    Resolution {
        lines,
        reversions,
        outcome: Outcome::PerLine(decisions),
    }
}

/// Result of cleaning a whole text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// Working text with noise regions restored
    pub content: String,
    /// Number of regions or lines reverted
    pub reversions: usize,
}

/// Align `reference` and `working`, resolve every region and join the
/// chosen lines back into one text.
pub fn reconstruct(reference: &str, working: &str, profile: Option<CommentGrammar>) -> Reconstruction {
    let reference_lines = split_lines(reference);
    let working_lines = split_lines(working);

    let mut content = String::with_capacity(working.len());
    let mut reversions = 0;

    for region in align(&reference_lines, &working_lines) {
        let resolution = resolve(&region, profile);
        reversions += resolution.reversions;
        for line in resolution.lines {
            content.push_str(line);
        }
    }

    Reconstruction {
        content,
        reversions,
    }
}
