//! Hunk folding as a pure view over a row sequence.
//!
//! Folding never rewrites the row sequence. It maps a set of folded hunk
//! indices onto the rows, collapsing each folded hunk into a single
//! marker entry, so row indices held elsewhere (selection, search
//! results) stay valid across fold toggles.

use crate::rows::DisplayRow;
use std::collections::HashSet;

/// Folded hunk indices for one file.
pub type FoldState = HashSet<usize>;

/// One entry of a folded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldedRow {
    /// A visible row, by its index in the unfolded sequence.
    Visible(usize),
    /// All rows of a folded hunk collapsed into one marker.
    Folded {
        /// The folded hunk.
        hunk_index: usize,
        /// How many rows the marker hides.
        hidden_rows: usize,
    },
}

/// Collapse folded hunks into single marker rows.
///
/// Comment rows inherit the hunk of the nearest preceding row and fold
/// with it.
pub fn apply_folds<R: DisplayRow>(rows: &[R], folded: &FoldState) -> Vec<FoldedRow> {
    let mut view: Vec<FoldedRow> = Vec::new();
    let mut current_hunk: Option<usize> = None;

    for (index, row) in rows.iter().enumerate() {
        if let Some(hunk_index) = row.hunk_index() {
            current_hunk = Some(hunk_index);
        }

        match current_hunk {
            Some(hunk_index) if folded.contains(&hunk_index) => match view.last_mut() {
                Some(FoldedRow::Folded {
                    hunk_index: last,
                    hidden_rows,
                }) if *last == hunk_index => {
                    *hidden_rows += 1;
                }
                _ => view.push(FoldedRow::Folded {
                    hunk_index,
                    hidden_rows: 1,
                }),
            },
            _ => view.push(FoldedRow::Visible(index)),
        }
    }

    view
}

/// Resolve which hunk the row at `row_index` belongs to.
///
/// Comment rows carry no hunk of their own, so the scan walks backward
/// to the nearest row that does. `None` when the index is out of range
/// or no preceding row names a hunk.
pub fn hunk_index_at<R: DisplayRow>(rows: &[R], row_index: usize) -> Option<usize> {
    let upto = rows.get(..=row_index)?;
    upto.iter().rev().find_map(|row| row.hunk_index())
}

/// Return a new fold set with the given hunk toggled.
pub fn toggle_fold(folded: &FoldState, hunk_index: usize) -> FoldState {
    let mut next = folded.clone();
    if !next.remove(&hunk_index) {
        next.insert(hunk_index);
    }
    next
}
