//! Data Transfer Objects for the HTTP API.
//!
//! Posts (with their embedded comments) already serialize with a public string
//! `id`, so they are re-exported as-is. Request bodies for both create endpoints share
//! [`Submission`].

use serde::{Deserialize, Serialize};

pub use crate::models::{Post, Submission};
use crate::models::{CommentId, PostId};

pub const POST_CREATED: &str = "Post created successfully";
pub const COMMENT_ADDED: &str = "Comment added successfully";

/// Response for post creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub id: PostId,
}

impl CreatePostResponse {
    pub fn new(id: PostId) -> Self {
        Self {
            message: POST_CREATED.to_string(),
            id,
        }
    }
}

/// Response for comment creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentResponse {
    pub message: String,
    pub comment_id: CommentId,
}

impl CreateCommentResponse {
    pub fn new(comment_id: CommentId) -> Self {
        Self {
            message: COMMENT_ADDED.to_string(),
            comment_id,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
