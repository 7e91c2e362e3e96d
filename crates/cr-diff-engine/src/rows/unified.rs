//! Unified (single-column) row construction.

use super::word_diff::word_diff;
use super::{CommentRow, LineRow, UnifiedRow};
use crate::model::{CommentKey, CommentMap, DiffLine, Hunk, LineKind};

/// Flatten hunks into the unified row sequence.
///
/// Each hunk contributes a synthesized header row followed by its lines
/// in patch order. Comment threads are emitted directly below the line
/// they anchor to; a context line can carry both a RIGHT and a LEFT
/// thread, RIGHT first. Paired deletion/addition runs get word-diff
/// annotation afterwards.
pub fn build_unified_rows(hunks: &[Hunk], comments: Option<&CommentMap>) -> Vec<UnifiedRow> {
    let mut rows: Vec<UnifiedRow> = Vec::new();

    for (hunk_index, hunk) in hunks.iter().enumerate() {
        rows.push(UnifiedRow::Line(LineRow::new(
            DiffLine::hunk_header(hunk.header.clone()),
            hunk_index,
        )));

        for line in &hunk.lines {
            rows.push(UnifiedRow::Line(LineRow::new(line.clone(), hunk_index)));

            if let Some(map) = comments {
                for key in CommentKey::keys_for_line(line) {
                    if let Some(thread) = map.get(&key) {
                        rows.push(UnifiedRow::Comment(CommentRow {
                            key,
                            thread: thread.clone(),
                        }));
                    }
                }
            }
        }
    }

    annotate_word_diffs(&mut rows);
    rows
}

/// Pair consecutive deletion runs with the addition runs that follow and
/// attach word-diff segments to both rows of each pair.
///
/// Comment rows interleaved in a run do not break it; any other row kind
/// does, so pairing never crosses a hunk header.
fn annotate_word_diffs(rows: &mut [UnifiedRow]) {
    let len = rows.len();
    let mut cursor = 0;

    while cursor < len {
        if !row_has_kind(&rows[cursor], LineKind::Deletion) {
            cursor += 1;
            continue;
        }

        let mut scan = cursor;
        let mut del_indices = Vec::new();
        while scan < len {
            if row_has_kind(&rows[scan], LineKind::Deletion) {
                del_indices.push(scan);
                scan += 1;
            } else if rows[scan].is_comment() {
                scan += 1;
            } else {
                break;
            }
        }

        let mut add_indices = Vec::new();
        while scan < len {
            if row_has_kind(&rows[scan], LineKind::Addition) {
                add_indices.push(scan);
                scan += 1;
            } else if rows[scan].is_comment() {
                scan += 1;
            } else {
                break;
            }
        }

        for (&del_index, &add_index) in del_indices.iter().zip(add_indices.iter()) {
            attach_pair(rows, del_index, add_index);
        }

        cursor = scan;
    }
}

/// Attach word-diff segments to one deletion/addition pair.
fn attach_pair(rows: &mut [UnifiedRow], del_index: usize, add_index: usize) {
    let old_text = match &rows[del_index] {
        UnifiedRow::Line(row) => row.line.content.clone(),
        UnifiedRow::Comment(_) => return,
    };
    let new_text = match &rows[add_index] {
        UnifiedRow::Line(row) => row.line.content.clone(),
        UnifiedRow::Comment(_) => return,
    };

    let Some(diff) = word_diff(&old_text, &new_text) else {
        return;
    };

    if let UnifiedRow::Line(row) = &mut rows[del_index] {
        row.word_diff = Some(diff.old);
    }
    if let UnifiedRow::Line(row) = &mut rows[add_index] {
        row.word_diff = Some(diff.new);
    }
}

fn row_has_kind(row: &UnifiedRow, kind: LineKind) -> bool {
    matches!(row, UnifiedRow::Line(line_row) if line_row.line.kind == kind)
}
