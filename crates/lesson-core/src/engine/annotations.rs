//! Per-stage discussion threads.

use std::collections::BTreeMap;

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    error::{PlannerError, Result},
    models::{Comment, CommentThread, NewComment},
};

/// Append-only comment threads keyed by stage key.
///
/// A store belongs to one plan: [`crate::engine::EditSession`] owns one per
/// document and the database keys persisted comments by plan and stage, so
/// threads of different plans never mix.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    threads: BTreeMap<String, CommentThread>,
}

impl AnnotationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with threads loaded from persistence.
    pub fn from_threads(threads: impl IntoIterator<Item = (String, CommentThread)>) -> Self {
        Self {
            threads: threads.into_iter().collect(),
        }
    }

    /// Append a comment to the thread for `stage_key`, creating the thread on
    /// first use. The comment gets a fresh id and the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidComment` when the message is empty or
    /// whitespace-only; the thread is left untouched.
    pub fn append(&mut self, stage_key: &str, comment: NewComment) -> Result<&CommentThread> {
        if comment.message.trim().is_empty() {
            return Err(PlannerError::InvalidComment {
                reason: "message must not be empty".to_string(),
            });
        }

        let comment = Comment {
            id: Uuid::now_v7().to_string(),
            author: comment.author,
            author_role: comment.author_role,
            message: comment.message,
            timestamp: Timestamp::now(),
        };

        let thread = self.threads.entry(stage_key.to_string()).or_default();
        thread.push(comment);
        Ok(&*thread)
    }

    /// Comments for `stage_key` in insertion order; empty when none exist.
    pub fn thread_for(&self, stage_key: &str) -> &[Comment] {
        self.threads
            .get(stage_key)
            .map(CommentThread::as_slice)
            .unwrap_or(&[])
    }

    /// Stage keys that have at least one comment, with their threads.
    pub fn threads(&self) -> impl Iterator<Item = (&str, &CommentThread)> {
        self.threads
            .iter()
            .map(|(key, thread)| (key.as_str(), thread))
    }

    /// Total number of comments across all threads.
    pub fn comment_count(&self) -> usize {
        self.threads.values().map(CommentThread::len).sum()
    }
}
