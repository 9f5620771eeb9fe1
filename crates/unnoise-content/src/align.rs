//! Line alignment between the reference and working versions of a file

use std::ops::Range;

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffTag, capture_diff_slices};

/// Kind of an aligned region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTag {
    /// Both sides are byte-identical
    Equal,
    /// Lines only present in the working version
    Insert,
    /// Lines only present in the reference version
    Delete,
    /// Both sides present and different
    Replace,
}

/// A maximal run of aligned lines.
///
/// Lines keep their terminators, so concatenating them reproduces the
/// original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'a> {
    pub tag: RegionTag,
    pub reference: &'a [&'a str],
    pub working: &'a [&'a str],
}

/// Split `text` into lines, keeping each line's terminator.
///
/// `\n`, `\r\n` and a lone `\r` end a line. The final line may have no
/// terminator. `split_lines(t).concat() == t` always holds.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..=i]);
                start = i + 1;
            }
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                lines.push(&text[start..=i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Pending span while coalescing diff operations.
struct Span {
    equal: bool,
    reference: Range<usize>,
    working: Range<usize>,
}

/// Align two line sequences into tagged regions.
///
/// Uses patience diff (falling back to Myers inside unmatched stretches).
/// Adjacent operations are coalesced: consecutive equal runs merge, and any
/// run of non-equal operations becomes one region tagged by which sides it
/// covers. Regions cover both inputs completely and in order.
pub fn align<'a>(reference: &'a [&'a str], working: &'a [&'a str]) -> Vec<Region<'a>> {
    let ops = capture_diff_slices(Algorithm::Patience, reference, working);

    let mut spans: Vec<Span> = Vec::with_capacity(ops.len());
    for op in &ops {
        let (tag, old, new) = op.as_tag_tuple();
        if old.is_empty() && new.is_empty() {
            continue;
        }
        let equal = tag == DiffTag::Equal;
        match spans.last_mut() {
            Some(last) if last.equal == equal => {
                last.reference.end = old.end;
                last.working.end = new.end;
            }
            _ => spans.push(Span {
                equal,
                reference: old,
                working: new,
            }),
        }
    }

    spans
        .into_iter()
        .map(|span| {
            let tag = if span.equal {
                RegionTag::Equal
            } else if span.reference.is_empty() {
                RegionTag::Insert
            } else if span.working.is_empty() {
                RegionTag::Delete
            } else {
                RegionTag::Replace
            };
            Region {
                tag,
                reference: &reference[span.reference],
                working: &working[span.working],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines_keeps_terminators() {
        assert_eq!(
            split_lines("a\nb\r\nc\rd"),
            vec!["a\n", "b\r\n", "c\r", "d"]
        );
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_lines_blank_lines() {
        assert_eq!(split_lines("\n\n"), vec!["\n", "\n"]);
    }

    #[test]
    fn test_align_both_empty() {
        assert!(align(&[], &[]).is_empty());
    }

    #[test]
    fn test_align_reference_empty_is_single_insert() {
        let working = ["a\n", "b\n"];
        let regions = align(&[], &working);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].tag, RegionTag::Insert);
        assert_eq!(regions[0].working, &working[..]);
    }

    #[test]
    fn test_align_working_empty_is_single_delete() {
        let reference = ["a\n"];
        let regions = align(&reference, &[]);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].tag, RegionTag::Delete);
    }

    #[test]
    fn test_align_identical_is_single_equal() {
        let lines = ["a\n", "b\n", "c\n"];
        let regions = align(&lines, &lines);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].tag, RegionTag::Equal);
    }

    #[test]
    fn test_align_middle_replace() {
        let reference = ["a\n", "b\n", "c\n"];
        let working = ["a\n", "B\n", "c\n"];
        let tags: Vec<_> = align(&reference, &working).iter().map(|r| r.tag).collect();
        assert_eq!(
            tags,
            vec![RegionTag::Equal, RegionTag::Replace, RegionTag::Equal]
        );
    }

    #[test]
    fn test_align_insert_and_delete() {
        let reference = ["a\n", "b\n", "c\n"];
        let working = ["a\n", "c\n", "d\n"];
        let regions = align(&reference, &working);
        let tags: Vec<_> = regions.iter().map(|r| r.tag).collect();
        assert_eq!(
            tags,
            vec![
                RegionTag::Equal,
                RegionTag::Delete,
                RegionTag::Equal,
                RegionTag::Insert
            ]
        );
        assert_eq!(regions[1].reference, &["b\n"][..]);
        assert_eq!(regions[3].working, &["d\n"][..]);
    }

    #[test]
    fn test_align_no_adjacent_same_tags() {
        let reference = ["a\n", "x\n", "y\n", "b\n"];
        let working = ["a\n", "p\n", "q\n", "r\n", "b\n"];
        let regions = align(&reference, &working);
        for pair in regions.windows(2) {
            assert_ne!(pair[0].tag == RegionTag::Equal, pair[1].tag == RegionTag::Equal);
        }
    }
}
