//! Diff data structures shared by every engine component.

use serde::{Deserialize, Serialize};

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line (for context).
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
    /// @@ header line.
    HunkHeader,
}

impl LineKind {
    /// Whether this kind represents an added or removed line.
    pub fn is_change(&self) -> bool {
        matches!(self, LineKind::Addition | LineKind::Deletion)
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (for Context and Addition).
    pub new_line: Option<u32>,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Create a header line from the raw @@ text.
    pub fn hunk_header(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::HunkHeader,
            content: content.into(),
            old_line: None,
            new_line: None,
        }
    }
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create a new hunk with the given header info.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_count, new_start, new_count
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// Create a hunk with a function context in header.
    pub fn with_context(
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
        context: &str,
    ) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@ {}",
                old_start, old_count, new_start, new_count, context
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// Whether the hunk contains any added or removed line.
    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(|l| l.kind.is_change())
    }
}

/// One changed file as listed by a provider's diff endpoint.
///
/// The raw `patch` is absent for binary or oversized files, in which case
/// there is nothing to parse or search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePatch {
    /// Current file path.
    pub path: String,
    /// Raw unified hunk text for this file.
    pub patch: Option<String>,
}

impl FilePatch {
    /// Create a file entry without patch text.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            patch: None,
        }
    }

    /// Create a file entry with its raw patch text.
    pub fn with_patch(path: impl Into<String>, patch: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            patch: Some(patch.into()),
        }
    }
}

/// Added/deleted line totals for a set of hunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

/// Count added and deleted lines across hunks.
pub fn change_counts(hunks: &[Hunk]) -> ChangeCounts {
    let additions = hunks
        .iter()
        .flat_map(|h| &h.lines)
        .filter(|l| l.kind == LineKind::Addition)
        .count();
    let deletions = hunks
        .iter()
        .flat_map(|h| &h.lines)
        .filter(|l| l.kind == LineKind::Deletion)
        .count();

    ChangeCounts {
        additions,
        deletions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunk_header_format() {
        let hunk = Hunk::new(10, 5, 10, 7);
        assert_eq!(hunk.header, "@@ -10,5 +10,7 @@");

        let hunk = Hunk::with_context(10, 5, 10, 7, "fn example()");
        assert_eq!(hunk.header, "@@ -10,5 +10,7 @@ fn example()");
    }

    #[test]
    fn test_diff_line_kinds() {
        let ctx = DiffLine::context("unchanged", 5, 5);
        assert_eq!(ctx.kind, LineKind::Context);
        assert_eq!(ctx.old_line, Some(5));
        assert_eq!(ctx.new_line, Some(5));

        let add = DiffLine::addition("new line", 10);
        assert_eq!(add.kind, LineKind::Addition);
        assert_eq!(add.old_line, None);
        assert_eq!(add.new_line, Some(10));

        let del = DiffLine::deletion("removed line", 8);
        assert_eq!(del.kind, LineKind::Deletion);
        assert_eq!(del.old_line, Some(8));
        assert_eq!(del.new_line, None);

        let header = DiffLine::hunk_header("@@ -1,2 +1,2 @@");
        assert_eq!(header.kind, LineKind::HunkHeader);
        assert_eq!(header.old_line, None);
        assert_eq!(header.new_line, None);
    }

    #[test]
    fn test_change_counts() {
        let mut hunk = Hunk::new(1, 3, 1, 3);
        hunk.lines.push(DiffLine::context("fn main() {", 1, 1));
        hunk.lines.push(DiffLine::deletion("    old()", 2));
        hunk.lines.push(DiffLine::addition("    new()", 2));
        hunk.lines.push(DiffLine::addition("    extra()", 3));

        let counts = change_counts(&[hunk]);
        assert_eq!(counts.additions, 2);
        assert_eq!(counts.deletions, 1);

        assert_eq!(change_counts(&[]), ChangeCounts::default());
    }

    #[test]
    fn test_has_changes() {
        let mut hunk = Hunk::new(1, 2, 1, 2);
        hunk.lines.push(DiffLine::context("a", 1, 1));
        assert!(!hunk.has_changes());

        hunk.lines.push(DiffLine::addition("b", 2));
        assert!(hunk.has_changes());
    }
}
