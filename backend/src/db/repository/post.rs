//! Post collection trait.
//!
//! A post is a single document; its comments are embedded in it. There is no
//! separate comment collection and nothing is ever updated in place or removed.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{CommentId, NewEntry, Post, PostId};

/// Repository trait for the post collection.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request handlers.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Persist a new post with an empty comment list.
    ///
    /// # Returns
    /// * `Ok(PostId)` - The identifier generated for the post
    /// * `Err(RepositoryError)` - If the store rejected the write
    async fn insert_post(&self, entry: NewEntry) -> RepositoryResult<PostId>;

    /// List every post, most recent `timestamp` first, comments embedded.
    async fn list_posts(&self) -> RepositoryResult<Vec<Post>>;

    /// Fetch a single post by ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no post has this ID
    async fn get_post(&self, post_id: PostId) -> RepositoryResult<Post>;

    /// Append a comment to a post's comment list as one atomic store operation.
    ///
    /// # Returns
    /// * `Ok(CommentId)` - The identifier generated for the comment
    /// * `Err(RepositoryError::NotFound)` - If no post has this ID; nothing is written
    async fn push_comment(&self, post_id: PostId, entry: NewEntry) -> RepositoryResult<CommentId>;
}
