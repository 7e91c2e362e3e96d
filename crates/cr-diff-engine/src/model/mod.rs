//! Data models shared by parsing, row building, and navigation.

mod comment;
mod diff;

pub use comment::{CommentKey, CommentMap, CommentThread, DiffSide, ReviewComment, ReviewThread};
pub use diff::{change_counts, ChangeCounts, DiffLine, FilePatch, Hunk, LineKind};
