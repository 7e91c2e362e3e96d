//! Jump targets for hunk-to-hunk and go-to-line movement.
//!
//! Both hunk jumps land on the *first* changed row of the target hunk,
//! whichever direction the scan ran. That keeps next and prev inverses
//! of each other: jumping forward and then backward returns to the row
//! you left.

use crate::fold::hunk_index_at;
use crate::rows::DisplayRow;

/// Index of the first changed row of the next hunk after `from`.
///
/// Wraps around the row sequence once. `None` when no other hunk has
/// changed rows, including the single-hunk case.
pub fn next_hunk_start<R: DisplayRow>(rows: &[R], from: usize) -> Option<usize> {
    hunk_scan(rows, from, Direction::Forward)
}

/// Index of the first changed row of the nearest hunk before `from`.
///
/// Wraps around the row sequence once. `None` when no other hunk has
/// changed rows.
pub fn prev_hunk_start<R: DisplayRow>(rows: &[R], from: usize) -> Option<usize> {
    hunk_scan(rows, from, Direction::Backward)
}

/// First row displaying the given line number.
pub fn row_at_line<R: DisplayRow>(rows: &[R], line: u32) -> Option<usize> {
    rows.iter().position(|row| row.line_number() == Some(line))
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

fn hunk_scan<R: DisplayRow>(rows: &[R], from: usize, direction: Direction) -> Option<usize> {
    let len = rows.len();
    if len == 0 {
        return None;
    }
    let from = from.min(len - 1);
    let current = hunk_index_at(rows, from);

    for step in 1..len {
        let index = match direction {
            Direction::Forward => (from + step) % len,
            Direction::Backward => (from + len - step) % len,
        };
        let row = &rows[index];
        if !row.is_change() {
            continue;
        }
        match row.hunk_index() {
            Some(hunk) if current != Some(hunk) => {
                return Some(first_change_of_hunk(rows, index, hunk));
            }
            _ => {}
        }
    }

    None
}

/// Rewind from a changed row to the first changed row of its hunk.
fn first_change_of_hunk<R: DisplayRow>(rows: &[R], found: usize, hunk: usize) -> usize {
    let mut start = found;
    for index in (0..found).rev() {
        match rows[index].hunk_index() {
            Some(h) if h == hunk => {
                if rows[index].is_change() {
                    start = index;
                }
            }
            Some(_) => break,
            // Comment rows carry no hunk of their own
            None => continue,
        }
    }
    start
}
