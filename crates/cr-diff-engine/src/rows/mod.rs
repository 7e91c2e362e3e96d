//! Display-row construction for the two diff layouts.
//!
//! Row builders flatten hunks into the exact sequence a renderer would
//! draw: synthesized hunk headers, diff lines, and comment threads
//! interleaved below their anchor lines. Folding, search, and navigation
//! all address these sequences by row index, so the sequences are
//! recomputed rather than mutated when inputs change.

mod side_by_side;
mod unified;
mod word_diff;

pub use side_by_side::build_side_by_side_rows;
pub use unified::build_unified_rows;
pub use word_diff::{word_diff, SegmentKind, WordDiff, WordDiffSegment};

use crate::model::{CommentKey, CommentThread, DiffLine, LineKind};

/// A single row in the unified layout.
#[derive(Debug, Clone, PartialEq)]
pub enum UnifiedRow {
    /// A diff line, including synthesized hunk headers.
    Line(LineRow),
    /// A comment thread anchored to the preceding line.
    Comment(CommentRow),
}

impl UnifiedRow {
    /// The line row, if this is one.
    pub fn as_line(&self) -> Option<&LineRow> {
        match self {
            UnifiedRow::Line(row) => Some(row),
            UnifiedRow::Comment(_) => None,
        }
    }

    /// Whether this is a comment row.
    pub fn is_comment(&self) -> bool {
        matches!(self, UnifiedRow::Comment(_))
    }
}

/// A diff line placed in the unified row sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRow {
    /// The underlying diff line.
    pub line: DiffLine,
    /// Canonical line number for go-to-line lookup: the new side for
    /// additions and context, the old side for deletions.
    pub line_number: Option<u32>,
    /// Index of the hunk this row belongs to.
    pub hunk_index: usize,
    /// Word-diff segments for this row's side, when paired.
    pub word_diff: Option<Vec<WordDiffSegment>>,
}

impl LineRow {
    /// Place a diff line, computing its canonical line number.
    pub fn new(line: DiffLine, hunk_index: usize) -> Self {
        let line_number = match line.kind {
            LineKind::Addition | LineKind::Context => line.new_line,
            LineKind::Deletion => line.old_line,
            LineKind::HunkHeader => None,
        };
        Self {
            line,
            line_number,
            hunk_index,
            word_diff: None,
        }
    }

    /// Line number in the old file.
    pub fn old_line(&self) -> Option<u32> {
        self.line.old_line
    }

    /// Line number in the new file.
    pub fn new_line(&self) -> Option<u32> {
        self.line.new_line
    }

    /// Whether this row shows an added or removed line.
    pub fn is_change(&self) -> bool {
        self.line.kind.is_change()
    }

    /// Whether this row is a synthesized hunk header.
    pub fn is_header(&self) -> bool {
        self.line.kind == LineKind::HunkHeader
    }
}

/// A single row in the side-by-side layout.
#[derive(Debug, Clone, PartialEq)]
pub enum SideBySideRow {
    /// Positionally paired old/new lines.
    Paired(PairedRow),
    /// A synthesized hunk header spanning both columns.
    Header(HeaderRow),
    /// A comment thread anchored to the preceding row.
    Comment(CommentRow),
}

impl SideBySideRow {
    /// The paired row, if this is one.
    pub fn as_paired(&self) -> Option<&PairedRow> {
        match self {
            SideBySideRow::Paired(row) => Some(row),
            _ => None,
        }
    }

    /// Whether this is a comment row.
    pub fn is_comment(&self) -> bool {
        matches!(self, SideBySideRow::Comment(_))
    }
}

/// One left/right pairing in the side-by-side layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedRow {
    /// Old-side line; empty cell when a run of additions is longer.
    pub left: Option<DiffLine>,
    /// New-side line; empty cell when a run of deletions is longer.
    pub right: Option<DiffLine>,
    /// Index of the hunk this row belongs to.
    pub hunk_index: usize,
    /// Word-diff segments for the left cell, when both cells are paired.
    pub left_word_diff: Option<Vec<WordDiffSegment>>,
    /// Word-diff segments for the right cell, when both cells are paired.
    pub right_word_diff: Option<Vec<WordDiffSegment>>,
}

impl PairedRow {
    /// Whether either cell holds a changed line.
    pub fn is_change(&self) -> bool {
        self.left.as_ref().map_or(false, |l| l.kind.is_change())
            || self.right.as_ref().map_or(false, |l| l.kind.is_change())
    }

    /// Line number for go-to-line lookup, preferring the new side.
    pub fn line_number(&self) -> Option<u32> {
        self.left
            .as_ref()
            .and_then(|l| l.new_line)
            .or_else(|| self.right.as_ref().and_then(|l| l.new_line))
            .or_else(|| self.left.as_ref().and_then(|l| l.old_line))
    }
}

/// A hunk header spanning both columns.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRow {
    /// The synthesized header line.
    pub line: DiffLine,
    /// Index of the hunk this header opens.
    pub hunk_index: usize,
}

/// A comment thread row anchored below a diff line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRow {
    /// The (side, line) the thread attaches to.
    pub key: CommentKey,
    /// The thread to display.
    pub thread: CommentThread,
}

/// Layout-independent view of a display row.
///
/// Folding, hunk navigation, and go-to-line work over both layouts
/// through this trait instead of duplicating the per-layout scans.
pub trait DisplayRow {
    /// Hunk the row belongs to. `None` for comment rows, which inherit
    /// the hunk of the nearest preceding row.
    fn hunk_index(&self) -> Option<usize>;

    /// Whether the row shows an added or removed line.
    fn is_change(&self) -> bool;

    /// Line number used for go-to-line lookup.
    fn line_number(&self) -> Option<u32>;
}

impl DisplayRow for UnifiedRow {
    fn hunk_index(&self) -> Option<usize> {
        match self {
            UnifiedRow::Line(row) => Some(row.hunk_index),
            UnifiedRow::Comment(_) => None,
        }
    }

    fn is_change(&self) -> bool {
        match self {
            UnifiedRow::Line(row) => row.is_change(),
            UnifiedRow::Comment(_) => false,
        }
    }

    fn line_number(&self) -> Option<u32> {
        match self {
            UnifiedRow::Line(row) => row.line_number,
            UnifiedRow::Comment(_) => None,
        }
    }
}

impl DisplayRow for SideBySideRow {
    fn hunk_index(&self) -> Option<usize> {
        match self {
            SideBySideRow::Paired(row) => Some(row.hunk_index),
            SideBySideRow::Header(row) => Some(row.hunk_index),
            SideBySideRow::Comment(_) => None,
        }
    }

    fn is_change(&self) -> bool {
        match self {
            SideBySideRow::Paired(row) => row.is_change(),
            SideBySideRow::Header(_) | SideBySideRow::Comment(_) => false,
        }
    }

    fn line_number(&self) -> Option<u32> {
        match self {
            SideBySideRow::Paired(row) => row.line_number(),
            SideBySideRow::Header(_) | SideBySideRow::Comment(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_row_canonical_numbers() {
        let del = LineRow::new(DiffLine::deletion("old", 6), 0);
        assert_eq!(del.line_number, Some(6));
        assert_eq!(del.old_line(), Some(6));
        assert_eq!(del.new_line(), None);

        let add = LineRow::new(DiffLine::addition("new", 7), 0);
        assert_eq!(add.line_number, Some(7));

        let ctx = LineRow::new(DiffLine::context("same", 5, 9), 0);
        assert_eq!(ctx.line_number, Some(9));

        let header = LineRow::new(DiffLine::hunk_header("@@ -1 +1 @@"), 0);
        assert_eq!(header.line_number, None);
        assert!(header.is_header());
        assert!(!header.is_change());
    }

    #[test]
    fn test_paired_row_line_number_fallback() {
        let ctx = PairedRow {
            left: Some(DiffLine::context("same", 5, 9)),
            right: Some(DiffLine::context("same", 5, 9)),
            hunk_index: 0,
            left_word_diff: None,
            right_word_diff: None,
        };
        assert_eq!(ctx.line_number(), Some(9));
        assert!(!ctx.is_change());

        let del_only = PairedRow {
            left: Some(DiffLine::deletion("gone", 4)),
            right: None,
            hunk_index: 0,
            left_word_diff: None,
            right_word_diff: None,
        };
        assert_eq!(del_only.line_number(), Some(4));
        assert!(del_only.is_change());

        let add_only = PairedRow {
            left: None,
            right: Some(DiffLine::addition("fresh", 11)),
            hunk_index: 0,
            left_word_diff: None,
            right_word_diff: None,
        };
        assert_eq!(add_only.line_number(), Some(11));
        assert!(add_only.is_change());
    }
}
