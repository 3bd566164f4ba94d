//! Stage discussion comments.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::AuthorRole;

/// A single immutable comment in a stage thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Unique identifier (time-ordered UUID)
    pub id: String,

    /// Display name of the author
    pub author: String,

    /// Role the author wrote the comment in
    pub author_role: AuthorRole,

    /// Comment body, stored exactly as entered
    pub message: String,

    /// Timestamp when the comment was appended (UTC)
    pub timestamp: Timestamp,
}

/// A comment before the store has assigned its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub author_role: AuthorRole,
    pub message: String,
}

impl NewComment {
    pub fn new(
        author: impl Into<String>,
        author_role: AuthorRole,
        message: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            author_role,
            message: message.into(),
        }
    }
}

/// Append-only, insertion-ordered list of comments for one stage key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CommentThread(Vec<Comment>);

impl CommentThread {
    /// Create an empty thread.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of comments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the thread has no comments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comments in insertion order.
    pub fn as_slice(&self) -> &[Comment] {
        &self.0
    }

    /// Get an iterator over the comments.
    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.0.iter()
    }

    /// Most recent comment.
    pub fn last(&self) -> Option<&Comment> {
        self.0.last()
    }

    pub(crate) fn push(&mut self, comment: Comment) {
        self.0.push(comment);
    }
}

impl<'a> IntoIterator for &'a CommentThread {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
