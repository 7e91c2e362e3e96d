//! Comment-related data structures for review threads.

use super::diff::{DiffLine, LineKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which side of the diff a comment is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffSide {
    /// Old file (deletions side).
    Left,
    /// New file (additions side).
    Right,
}

impl DiffSide {
    /// Provider wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffSide::Left => "LEFT",
            DiffSide::Right => "RIGHT",
        }
    }
}

/// The (side, line number) identity a review thread attaches to.
///
/// Deletions anchor on the LEFT under their old line number; additions and
/// context lines anchor on the RIGHT under their new line number. A context
/// line exists in both file versions, so it can additionally carry a LEFT
/// thread under its old line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentKey {
    /// Which side of the diff.
    pub side: DiffSide,
    /// Line number in the respective file version.
    pub line: u32,
}

impl CommentKey {
    /// Key on the old side of the diff.
    pub fn left(line: u32) -> Self {
        Self {
            side: DiffSide::Left,
            line,
        }
    }

    /// Key on the new side of the diff.
    pub fn right(line: u32) -> Self {
        Self {
            side: DiffSide::Right,
            line,
        }
    }

    /// The primary key for a diff line, if it can carry comments.
    pub fn for_line(line: &DiffLine) -> Option<Self> {
        match line.kind {
            LineKind::Deletion => line.old_line.map(Self::left),
            LineKind::Addition | LineKind::Context => line.new_line.map(Self::right),
            LineKind::HunkHeader => None,
        }
    }

    /// The secondary LEFT key a context line can also carry.
    pub fn secondary_for_line(line: &DiffLine) -> Option<Self> {
        match line.kind {
            LineKind::Context => line.old_line.map(Self::left),
            _ => None,
        }
    }

    /// All keys a line can anchor threads under, primary first.
    pub fn keys_for_line(line: &DiffLine) -> impl Iterator<Item = CommentKey> {
        Self::for_line(line)
            .into_iter()
            .chain(Self::secondary_for_line(line))
    }
}

impl fmt::Display for CommentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side.as_str(), self.line)
    }
}

/// A review comment as normalized from a provider API.
///
/// Providers differ in their review payloads; the client layer flattens
/// them to this shape before handing them to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Provider comment id.
    pub id: u64,
    /// Id of the comment this one replies to, if any.
    pub in_reply_to: Option<u64>,
    /// File path the comment is on.
    pub path: String,
    /// Which side of the diff the comment is anchored to.
    pub side: DiffSide,
    /// Current line number in the diff, absent when the position is outdated.
    pub line: Option<u32>,
    /// Author's username.
    pub author: String,
    /// Comment body (markdown).
    pub body: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

/// Thread-level review metadata as normalized from a provider API.
///
/// REST-style providers only return flat comment lists; in that case no
/// thread entries exist and resolution state stays unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewThread {
    /// Provider thread id.
    pub id: String,
    /// Whether the thread is marked resolved.
    pub is_resolved: bool,
    /// Ids of the comments that belong to this thread.
    pub comment_ids: Vec<u64>,
}

/// A comment thread attached to one diff line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread {
    /// Comments in display order, root first.
    pub comments: Vec<ReviewComment>,
    /// Provider thread id, when thread data was available.
    pub thread_id: Option<String>,
    /// Resolution state, when thread data was available.
    pub is_resolved: Option<bool>,
}

impl CommentThread {
    /// The root comment of the thread.
    pub fn root(&self) -> Option<&ReviewComment> {
        self.comments.first()
    }

    /// Number of replies under the root.
    pub fn reply_count(&self) -> usize {
        self.comments.len().saturating_sub(1)
    }
}

/// Threads keyed by the (side, line) they attach to.
pub type CommentMap = HashMap<CommentKey, CommentThread>;
