//! Word-level diffing for paired deletion/addition lines.

use similar::{ChangeTag, TextDiff};

/// Kind of a word-diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Token run present on both sides.
    Equal,
    /// Token run removed from the old side or added on the new side.
    Changed,
}

/// A run of words within one side of a compared line pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDiffSegment {
    /// Segment text; concatenating a side's segments reproduces the line.
    pub text: String,
    /// Whether the run is shared or changed.
    pub kind: SegmentKind,
}

/// Aligned word-diff segments for a deletion/addition pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDiff {
    /// Segments reproducing the old line.
    pub old: Vec<WordDiffSegment>,
    /// Segments reproducing the new line.
    pub new: Vec<WordDiffSegment>,
}

/// Compute word-level segments for a deletion/addition pair.
///
/// Returns `None` when the two lines share no words or differ in none, so
/// identical and wholly rewritten pairs fall back to plain line coloring.
pub fn word_diff(old: &str, new: &str) -> Option<WordDiff> {
    let diff = TextDiff::from_words(old, new);

    let mut old_segments: Vec<WordDiffSegment> = Vec::new();
    let mut new_segments: Vec<WordDiffSegment> = Vec::new();
    let mut equal_seen = false;
    let mut changed_seen = false;

    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                equal_seen = true;
                push_segment(&mut old_segments, text, SegmentKind::Equal);
                push_segment(&mut new_segments, text, SegmentKind::Equal);
            }
            ChangeTag::Delete => {
                changed_seen = true;
                push_segment(&mut old_segments, text, SegmentKind::Changed);
            }
            ChangeTag::Insert => {
                changed_seen = true;
                push_segment(&mut new_segments, text, SegmentKind::Changed);
            }
        }
    }

    if equal_seen && changed_seen {
        Some(WordDiff {
            old: old_segments,
            new: new_segments,
        })
    } else {
        None
    }
}

/// Append a token run, coalescing with a previous run of the same kind.
fn push_segment(segments: &mut Vec<WordDiffSegment>, text: &str, kind: SegmentKind) {
    if let Some(last) = segments.last_mut() {
        if last.kind == kind {
            last.text.push_str(text);
            return;
        }
    }
    segments.push(WordDiffSegment {
        text: text.to_string(),
        kind,
    });
}
