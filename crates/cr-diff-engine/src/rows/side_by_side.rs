//! Side-by-side (two-column) row construction.

use super::word_diff::word_diff;
use super::{CommentRow, HeaderRow, PairedRow, SideBySideRow};
use crate::model::{CommentKey, CommentMap, DiffLine, Hunk, LineKind};

/// Flatten hunks into the side-by-side row sequence.
///
/// Deletions and additions inside a hunk are paired positionally: the
/// i-th deletion of a run shares a row with the i-th addition that
/// follows it, and the longer run leaves empty cells on the other side.
/// Context lines occupy both columns. Comment threads follow the row
/// holding their anchor line.
pub fn build_side_by_side_rows(
    hunks: &[Hunk],
    comments: Option<&CommentMap>,
) -> Vec<SideBySideRow> {
    let mut rows: Vec<SideBySideRow> = Vec::new();

    for (hunk_index, hunk) in hunks.iter().enumerate() {
        rows.push(SideBySideRow::Header(HeaderRow {
            line: DiffLine::hunk_header(hunk.header.clone()),
            hunk_index,
        }));

        let mut pending_dels: Vec<DiffLine> = Vec::new();
        let mut pending_adds: Vec<DiffLine> = Vec::new();

        for line in &hunk.lines {
            match line.kind {
                LineKind::Deletion => pending_dels.push(line.clone()),
                LineKind::Addition => pending_adds.push(line.clone()),
                _ => {
                    flush_pending(
                        &mut rows,
                        &mut pending_dels,
                        &mut pending_adds,
                        hunk_index,
                        comments,
                    );
                    push_context_row(&mut rows, line, hunk_index, comments);
                }
            }
        }

        flush_pending(
            &mut rows,
            &mut pending_dels,
            &mut pending_adds,
            hunk_index,
            comments,
        );
    }

    rows
}

/// Emit pending deletion/addition runs as positionally paired rows.
fn flush_pending(
    rows: &mut Vec<SideBySideRow>,
    dels: &mut Vec<DiffLine>,
    adds: &mut Vec<DiffLine>,
    hunk_index: usize,
    comments: Option<&CommentMap>,
) {
    let pair_count = dels.len().max(adds.len());

    for index in 0..pair_count {
        let mut row = PairedRow {
            left: dels.get(index).cloned(),
            right: adds.get(index).cloned(),
            hunk_index,
            left_word_diff: None,
            right_word_diff: None,
        };

        if let (Some(left), Some(right)) = (&row.left, &row.right) {
            if let Some(diff) = word_diff(&left.content, &right.content) {
                row.left_word_diff = Some(diff.old);
                row.right_word_diff = Some(diff.new);
            }
        }

        let left_key = row
            .left
            .as_ref()
            .and_then(|l| l.old_line.map(CommentKey::left));
        let right_key = row
            .right
            .as_ref()
            .and_then(|l| l.new_line.map(CommentKey::right));

        rows.push(SideBySideRow::Paired(row));
        push_comment_rows(rows, [left_key, right_key], comments);
    }

    dels.clear();
    adds.clear();
}

/// Emit a context line occupying both columns, then its comment rows.
fn push_context_row(
    rows: &mut Vec<SideBySideRow>,
    line: &DiffLine,
    hunk_index: usize,
    comments: Option<&CommentMap>,
) {
    rows.push(SideBySideRow::Paired(PairedRow {
        left: Some(line.clone()),
        right: Some(line.clone()),
        hunk_index,
        left_word_diff: None,
        right_word_diff: None,
    }));

    // Same key order as the unified layout: RIGHT first, then LEFT
    let right_key = line.new_line.map(CommentKey::right);
    let left_key = line.old_line.map(CommentKey::left);
    push_comment_rows(rows, [right_key, left_key], comments);
}

/// Emit comment rows for any of the given keys holding a thread.
fn push_comment_rows(
    rows: &mut Vec<SideBySideRow>,
    keys: [Option<CommentKey>; 2],
    comments: Option<&CommentMap>,
) {
    let Some(map) = comments else {
        return;
    };

    for key in keys.into_iter().flatten() {
        if let Some(thread) = map.get(&key) {
            rows.push(SideBySideRow::Comment(CommentRow {
                key,
                thread: thread.clone(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommentThread, DiffSide, ReviewComment};
    use crate::parser::parse_patch;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn thread_at(side: DiffSide, line: u32) -> (CommentKey, CommentThread) {
        let key = CommentKey { side, line };
        let thread = CommentThread {
            comments: vec![ReviewComment {
                id: u64::from(line),
                in_reply_to: None,
                path: "src/main.rs".to_string(),
                side,
                line: Some(line),
                author: "reviewer".to_string(),
                body: "needs a test".to_string(),
                created_at: Utc::now(),
            }],
            thread_id: None,
            is_resolved: None,
        };
        (key, thread)
    }

    fn paired(rows: &[SideBySideRow]) -> Vec<&PairedRow> {
        rows.iter().filter_map(|r| r.as_paired()).collect()
    }

    #[test]
    fn test_uneven_runs_pair_positionally() {
        // Three deletions against one addition
        let patch = "@@ -1,4 +1,2 @@\n keep\n-a\n-b\n-c\n+d";
        let rows = build_side_by_side_rows(&parse_patch(patch).unwrap(), None);
        let pairs = paired(&rows);

        // One context row plus max(3, 1) paired rows
        assert_eq!(pairs.len(), 4);

        let both_sides = pairs
            .iter()
            .filter(|p| p.left.is_some() && p.right.is_some())
            .count();
        // Context row plus min(3, 1) del/add pairing
        assert_eq!(both_sides, 2);

        assert_eq!(pairs[1].left.as_ref().unwrap().content, "a");
        assert_eq!(pairs[1].right.as_ref().unwrap().content, "d");
        assert_eq!(pairs[2].left.as_ref().unwrap().content, "b");
        assert_eq!(pairs[2].right, None);
        assert_eq!(pairs[3].right, None);
    }

    #[test]
    fn test_context_occupies_both_columns() {
        let patch = "@@ -5,1 +7,1 @@\n shared";
        let rows = build_side_by_side_rows(&parse_patch(patch).unwrap(), None);

        let row = rows[1].as_paired().unwrap();
        assert_eq!(row.left.as_ref().unwrap().old_line, Some(5));
        assert_eq!(row.right.as_ref().unwrap().new_line, Some(7));
        assert_eq!(row.left, row.right);
    }

    #[test]
    fn test_header_row_per_hunk() {
        let patch = "@@ -1,1 +1,1 @@\n a\n@@ -9,1 +9,1 @@ fn tail()\n b";
        let rows = build_side_by_side_rows(&parse_patch(patch).unwrap(), None);

        let headers: Vec<(&str, usize)> = rows
            .iter()
            .filter_map(|r| match r {
                SideBySideRow::Header(h) => Some((h.line.content.as_str(), h.hunk_index)),
                _ => None,
            })
            .collect();
        assert_eq!(
            headers,
            vec![
                ("@@ -1,1 +1,1 @@", 0),
                ("@@ -9,1 +9,1 @@ fn tail()", 1),
            ]
        );
    }

    #[test]
    fn test_word_diff_only_on_full_pairs() {
        let patch = "@@ -1,2 +1,3 @@\n-deleted line\n+added line\n+new line\n keep";
        let rows = build_side_by_side_rows(&parse_patch(patch).unwrap(), None);
        let pairs = paired(&rows);

        // First pair: del/add with shared words
        assert!(pairs[0].left_word_diff.is_some());
        assert!(pairs[0].right_word_diff.is_some());
        // Second pair: addition with an empty left cell
        assert_eq!(pairs[1].left, None);
        assert_eq!(pairs[1].right_word_diff, None);
    }

    #[test]
    fn test_comments_follow_their_cell() {
        // LEFT:2 anchors on the deletion, RIGHT:2 on the addition
        let patch = "@@ -1,3 +1,3 @@\n keep\n-old text\n+old text now";
        let map: CommentMap = [thread_at(DiffSide::Left, 2), thread_at(DiffSide::Right, 2)]
            .into_iter()
            .collect();
        let rows = build_side_by_side_rows(&parse_patch(patch).unwrap(), Some(&map));

        // header, context, paired del/add, then LEFT comment before RIGHT
        assert_eq!(rows.len(), 5);
        match (&rows[3], &rows[4]) {
            (SideBySideRow::Comment(first), SideBySideRow::Comment(second)) => {
                assert_eq!(first.key, CommentKey::left(2));
                assert_eq!(second.key, CommentKey::right(2));
            }
            other => panic!("expected two comment rows, got {:?}", other),
        }
    }

    #[test]
    fn test_context_comments_right_then_left() {
        // Context line old 4 / new 6 carrying threads on both sides
        let patch = "@@ -4,1 +6,1 @@\n shared";
        let map: CommentMap = [thread_at(DiffSide::Right, 6), thread_at(DiffSide::Left, 4)]
            .into_iter()
            .collect();
        let rows = build_side_by_side_rows(&parse_patch(patch).unwrap(), Some(&map));

        assert_eq!(rows.len(), 4);
        match (&rows[2], &rows[3]) {
            (SideBySideRow::Comment(first), SideBySideRow::Comment(second)) => {
                assert_eq!(first.key, CommentKey::right(6));
                assert_eq!(second.key, CommentKey::left(4));
            }
            other => panic!("expected two comment rows, got {:?}", other),
        }
    }

    #[test]
    fn test_flush_at_hunk_end() {
        // A hunk ending in changes still pairs them
        let patch = "@@ -1,2 +1,2 @@\n keep\n-x1\n+x2";
        let rows = build_side_by_side_rows(&parse_patch(patch).unwrap(), None);
        let pairs = paired(&rows);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].left.as_ref().unwrap().content, "x1");
        assert_eq!(pairs[1].right.as_ref().unwrap().content, "x2");
    }

    #[test]
    fn test_empty_hunks() {
        assert_eq!(build_side_by_side_rows(&[], None), Vec::new());
    }
}
