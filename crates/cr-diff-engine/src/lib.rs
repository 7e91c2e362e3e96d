//! # cr-diff-engine
//!
//! A standalone diff presentation engine for terminal code review:
//! display-row construction (unified and side-by-side), inline comment
//! threading, word-level intraline diffs, hunk folding, virtual
//! windowing, search, and hunk navigation.
//!
//! ## Design Principles
//!
//! This crate is designed to be **instrumented**: it transforms data
//! it is handed and never talks to the network or the screen. The host
//! application fetches patches and comments, the engine turns them into
//! row sequences, and the host renders whichever slice it wants. This
//! enables:
//!
//! - Testability without mocking HTTP clients or terminals
//! - Reusability across review sources (GitHub, GitLab, local git)
//! - Deterministic output for every input
//!
//! ## Row-Sequence Architecture
//!
//! All viewing features operate on one shared currency: a flat sequence
//! of display rows. The row builders produce the sequence, comments are
//! spliced in as rows of their own, and folding, windowing, search, and
//! navigation each consume the sequence without rebuilding it. The two
//! row flavors share the [`DisplayRow`] trait so the consumers stay
//! generic over layout.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cr_diff_engine::{build_comment_map, build_unified_rows, next_hunk_start};
//! use cr_diff_engine::parser::parse_patch;
//!
//! // Parse one file's patch text into hunks
//! let hunks = parse_patch(patch_text)?;
//!
//! // Group review comments into threads keyed by diff position
//! let comments = build_comment_map("src/main.rs", &review_comments, &review_threads);
//!
//! // Build the displayable row sequence, comments spliced in
//! let rows = build_unified_rows(&hunks, Some(&comments));
//!
//! // Drive navigation from whatever key handling the host uses
//! if let Some(target) = next_hunk_start(&rows, selected_row) {
//!     selected_row = target;
//! }
//! ```

pub mod fold;
pub mod model;
pub mod navigation;
pub mod parser;
pub mod rows;
pub mod search;
pub mod threading;
pub mod window;

// Re-export commonly used types
pub use fold::{apply_folds, hunk_index_at, toggle_fold, FoldState, FoldedRow};
pub use model::{
    change_counts, ChangeCounts, CommentKey, CommentMap, CommentThread, DiffLine, DiffSide,
    FilePatch, Hunk, LineKind, ReviewComment, ReviewThread,
};
pub use navigation::{next_hunk_start, prev_hunk_start, row_at_line};
pub use parser::{parse_patch, ParseError};
pub use rows::{
    build_side_by_side_rows, build_unified_rows, word_diff, CommentRow, DisplayRow, HeaderRow,
    LineRow, PairedRow, SegmentKind, SideBySideRow, UnifiedRow, WordDiff, WordDiffSegment,
};
pub use search::{
    matched_file_count, search_file_patches, search_rows, search_side_by_side_rows,
    FileSearchMatch,
};
pub use threading::build_comment_map;
pub use window::{compute_window, VirtualWindow, WindowParams};
