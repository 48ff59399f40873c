//! Forum records: posts, their embedded comments, and raw client submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::parse_timestamp;
use crate::define_id_type;

define_id_type!(PostId);
define_id_type!(CommentId);

/// A reply embedded in exactly one [`Post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A top-level forum entry.
///
/// `comments` is append-only and kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Build a freshly created post with no comments.
    pub fn new(id: PostId, entry: NewEntry) -> Self {
        Self {
            id,
            content: entry.content,
            timestamp: entry.timestamp,
            comments: Vec::new(),
        }
    }
}

impl Comment {
    pub fn new(id: CommentId, entry: NewEntry) -> Self {
        Self {
            id,
            content: entry.content,
            timestamp: entry.timestamp,
        }
    }
}

/// Which kind of record a submission is meant to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Post,
    Comment,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Post => "Post",
            EntryKind::Comment => "Comment",
        }
    }
}

/// Reasons a submission is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{} content is missing", .0.label())]
    MissingContent(EntryKind),
    #[error("Invalid {} timestamp '{}': expected an RFC 3339 date-time", .kind.label().to_lowercase(), .value)]
    InvalidTimestamp { kind: EntryKind, value: String },
}

/// Raw request body for creating a post or a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Submission {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Validate the submission, falling back to `now` when no timestamp was sent.
    pub fn into_entry(
        self,
        kind: EntryKind,
        now: DateTime<Utc>,
    ) -> Result<NewEntry, SubmissionError> {
        let content = match self.content {
            Some(content) if !content.is_empty() => content,
            _ => return Err(SubmissionError::MissingContent(kind)),
        };

        let timestamp = match self.timestamp.as_deref().map(str::trim) {
            None | Some("") => now,
            Some(raw) => parse_timestamp(raw).map_err(|_| SubmissionError::InvalidTimestamp {
                kind,
                value: raw.to_string(),
            })?,
        };

        Ok(NewEntry { content, timestamp })
    }
}

/// A validated post or comment, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl NewEntry {
    pub fn new(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            timestamp,
        }
    }
}
