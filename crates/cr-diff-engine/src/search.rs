//! Case-insensitive substring search over built rows and raw patches.
//!
//! Single-file search works on the already built row sequence so the
//! match indices line up with what is on screen. Cross-file search goes
//! straight at the raw patch text instead, which keeps it cheap enough
//! to run over every file of a large review without building rows for
//! any of them.

use crate::model::FilePatch;
use crate::rows::{SideBySideRow, UnifiedRow};
use std::collections::HashSet;

/// One cross-file search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSearchMatch {
    /// Index of the file in the searched slice.
    pub file_index: usize,
    /// Path of the matched file.
    pub path: String,
    /// Raw line index within the file's patch text.
    pub line_index: usize,
    /// Matched line content with the diff prefix stripped.
    pub content: String,
}

/// Find unified rows whose content matches the query.
///
/// Hunk header and comment rows never match. An empty query matches
/// nothing.
pub fn search_rows(rows: &[UnifiedRow], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| match row {
            UnifiedRow::Line(line_row) => {
                !line_row.is_header() && matches_needle(&line_row.line.content, &needle)
            }
            UnifiedRow::Comment(_) => false,
        })
        .map(|(index, _)| index)
        .collect()
}

/// Find side-by-side rows where either cell matches the query.
pub fn search_side_by_side_rows(rows: &[SideBySideRow], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| match row {
            SideBySideRow::Paired(paired) => {
                paired
                    .left
                    .as_ref()
                    .map_or(false, |cell| matches_needle(&cell.content, &needle))
                    || paired
                        .right
                        .as_ref()
                        .map_or(false, |cell| matches_needle(&cell.content, &needle))
            }
            SideBySideRow::Header(_) | SideBySideRow::Comment(_) => false,
        })
        .map(|(index, _)| index)
        .collect()
}

/// Search the raw patch text of every file.
///
/// Files without a patch (binary or too-large files) are skipped. Hunk
/// header lines never match; other lines are tested with their diff
/// prefix stripped.
pub fn search_file_patches(files: &[FilePatch], query: &str) -> Vec<FileSearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut matches = Vec::new();

    for (file_index, file) in files.iter().enumerate() {
        let Some(patch) = file.patch.as_deref() else {
            continue;
        };
        if patch.is_empty() {
            continue;
        }

        for (line_index, line) in patch.lines().enumerate() {
            if line.starts_with("@@") {
                continue;
            }
            let content = line
                .strip_prefix('+')
                .or_else(|| line.strip_prefix('-'))
                .or_else(|| line.strip_prefix(' '))
                .unwrap_or(line);
            if matches_needle(content, &needle) {
                matches.push(FileSearchMatch {
                    file_index,
                    path: file.path.clone(),
                    line_index,
                    content: content.to_string(),
                });
            }
        }
    }

    matches
}

/// Number of distinct files with at least one match.
pub fn matched_file_count(matches: &[FileSearchMatch]) -> usize {
    matches
        .iter()
        .map(|entry| entry.file_index)
        .collect::<HashSet<_>>()
        .len()
}

fn matches_needle(content: &str, needle: &str) -> bool {
    content.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommentKey, CommentMap, CommentThread, DiffSide, ReviewComment};
    use crate::parser::parse_patch;
    use crate::rows::{build_side_by_side_rows, build_unified_rows};
    use chrono::Utc;

    const PATCH: &str = "@@ -5,3 +5,4 @@\n context line\n-deleted line\n+added line\n+new line\n trailing";

    fn unified_rows() -> Vec<UnifiedRow> {
        build_unified_rows(&parse_patch(PATCH).unwrap(), None)
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert_eq!(search_rows(&unified_rows(), ""), Vec::<usize>::new());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = unified_rows();

        assert_eq!(search_rows(&rows, "ADDED"), vec![3]);
        assert_eq!(search_rows(&rows, "Line"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_header_rows_never_match() {
        // "5" appears in the hunk header but on no content line
        assert_eq!(search_rows(&unified_rows(), "5"), Vec::<usize>::new());
    }

    #[test]
    fn test_comment_rows_never_match() {
        let key = CommentKey::right(7);
        let thread = CommentThread {
            comments: vec![ReviewComment {
                id: 1,
                in_reply_to: None,
                path: "src/main.rs".to_string(),
                side: DiffSide::Right,
                line: Some(7),
                author: "alice".to_string(),
                body: "added line needs a test".to_string(),
                created_at: Utc::now(),
            }],
            thread_id: None,
            is_resolved: None,
        };
        let map: CommentMap = [(key, thread)].into_iter().collect();
        let rows = build_unified_rows(&parse_patch(PATCH).unwrap(), Some(&map));

        // The comment body contains "added line" but only the line row matches
        assert_eq!(search_rows(&rows, "added line"), vec![3]);
    }

    #[test]
    fn test_side_by_side_empty_query_matches_nothing() {
        let rows = build_side_by_side_rows(&parse_patch(PATCH).unwrap(), None);

        assert_eq!(search_side_by_side_rows(&rows, ""), Vec::<usize>::new());
    }

    #[test]
    fn test_side_by_side_search_is_case_insensitive() {
        let rows = build_side_by_side_rows(&parse_patch(PATCH).unwrap(), None);

        assert_eq!(search_side_by_side_rows(&rows, "DELETED"), vec![2]);
        assert_eq!(search_side_by_side_rows(&rows, "Trailing"), vec![4]);
    }

    #[test]
    fn test_side_by_side_matches_either_cell() {
        let rows = build_side_by_side_rows(&parse_patch(PATCH).unwrap(), None);

        // Row 2: deleted line | added line
        assert_eq!(search_side_by_side_rows(&rows, "deleted"), vec![2]);
        assert_eq!(search_side_by_side_rows(&rows, "added"), vec![2]);
        // Row 3: empty left | new line
        assert_eq!(search_side_by_side_rows(&rows, "new line"), vec![3]);
        assert_eq!(
            search_side_by_side_rows(&rows, "@@"),
            Vec::<usize>::new()
        );
    }

    #[test]
    fn test_cross_file_search_skips_binary_files() {
        let files = vec![
            FilePatch::with_patch("src/lib.rs", PATCH),
            FilePatch::new("assets/logo.png"),
            FilePatch::with_patch("src/main.rs", "@@ -1,1 +1,1 @@\n-old main\n+new main"),
        ];

        let matches = search_file_patches(&files, "new");
        assert_eq!(matches.len(), 2);

        assert_eq!(matches[0].file_index, 0);
        assert_eq!(matches[0].path, "src/lib.rs");
        // Raw line index counts the hunk header line too
        assert_eq!(matches[0].line_index, 4);
        assert_eq!(matches[0].content, "new line");

        assert_eq!(matches[1].file_index, 2);
        assert_eq!(matches[1].content, "new main");
    }

    #[test]
    fn test_cross_file_search_strips_diff_prefixes() {
        let files = vec![FilePatch::with_patch(
            "src/lib.rs",
            "@@ -1,2 +1,2 @@\n context\n-removed\n+inserted",
        )];

        let matches = search_file_patches(&files, "inserted");
        assert_eq!(matches[0].content, "inserted");

        // A leading `-` only ever strips once
        let minus = search_file_patches(
            &[FilePatch::with_patch("a", "@@ -1 +1 @@\n--double dash")],
            "-double",
        );
        assert_eq!(minus[0].content, "-double dash");
    }

    #[test]
    fn test_matched_file_count_deduplicates() {
        let files = vec![
            FilePatch::with_patch("a.rs", "@@ -1,2 +1,2 @@\n shared\n+shared again"),
            FilePatch::with_patch("b.rs", "@@ -1,1 +1,1 @@\n unrelated"),
            FilePatch::with_patch("c.rs", "@@ -1,1 +1,1 @@\n shared"),
        ];

        let matches = search_file_patches(&files, "shared");
        assert_eq!(matches.len(), 3);
        assert_eq!(matched_file_count(&matches), 2);
    }
}
