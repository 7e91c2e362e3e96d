//! Group provider review comments into the map the row builders consume.
//!
//! Providers return review comments as a flat list in arrival order, plus
//! (for GraphQL-style APIs) thread metadata with resolution state. This
//! adapter threads the flat list per anchor key for one file.

use crate::model::{CommentKey, CommentMap, CommentThread, ReviewComment, ReviewThread};
use log::{debug, warn};
use std::collections::HashMap;

/// Group review comments for one file into threads keyed by their anchor.
///
/// Comments arrive oldest first, so each thread lists its root first and
/// replies in order. Roots without a current line (outdated positions)
/// are skipped, and replies whose parent was never seen are dropped.
/// Thread id and resolution state are taken from the matching
/// `ReviewThread` when the provider supplied one.
pub fn build_comment_map(
    path: &str,
    comments: &[ReviewComment],
    threads: &[ReviewThread],
) -> CommentMap {
    let mut map = CommentMap::new();
    let mut anchor_by_id: HashMap<u64, CommentKey> = HashMap::new();

    for comment in comments.iter().filter(|c| c.path == path) {
        if let Some(parent) = comment.in_reply_to {
            match anchor_by_id.get(&parent) {
                Some(&key) => {
                    // Register the reply too, so reply chains resolve
                    anchor_by_id.insert(comment.id, key);
                    if let Some(thread) = map.get_mut(&key) {
                        thread.comments.push(comment.clone());
                    }
                }
                None => {
                    warn!(
                        "dropping reply {} to unknown comment {} on {}",
                        comment.id, parent, comment.path
                    );
                }
            }
            continue;
        }

        let Some(line) = comment.line else {
            debug!(
                "skipping comment {} on {}: position is outdated",
                comment.id, comment.path
            );
            continue;
        };

        let key = CommentKey {
            side: comment.side,
            line,
        };
        if map.contains_key(&key) {
            debug!("replacing thread at {} with newer root {}", key, comment.id);
            // Unanchor the displaced thread's comments, so late replies to
            // them are dropped instead of landing in the replacing thread
            anchor_by_id.retain(|_, anchor| *anchor != key);
        }

        let info = threads.iter().find(|t| t.comment_ids.contains(&comment.id));
        anchor_by_id.insert(comment.id, key);
        map.insert(
            key,
            CommentThread {
                comments: vec![comment.clone()],
                thread_id: info.map(|t| t.id.clone()),
                is_resolved: info.map(|t| t.is_resolved),
            },
        );
    }

    map
}
