//! In-memory local repository implementation.
//!
//! This module provides a local implementation of [`PostRepository`] suitable for
//! unit testing and local development. All posts live in a `Vec` behind a single
//! lock, with a `HashMap` index from post ID to position.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{Comment, CommentId, NewEntry, Post, PostId};

/// In-memory local repository.
///
/// Comment appends take the write lock for the whole lookup-and-push, so two
/// concurrent comments on the same post can never overwrite each other.
///
/// # Example
/// ```
/// # use chrono::Utc;
/// # use forum_backend::db::repositories::LocalRepository;
/// # use forum_backend::db::repository::PostRepository;
/// # use forum_backend::models::NewEntry;
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::new();
/// repo.insert_post(NewEntry::new("hello", Utc::now())).await.unwrap();
///
/// let posts = repo.list_posts().await.unwrap();
/// assert_eq!(posts.len(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    posts: Vec<Post>,
    index: HashMap<PostId, usize>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            index: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy, every operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of posts stored.
    pub fn post_count(&self) -> usize {
        self.data.read().posts.len()
    }

    fn ensure_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if !data.is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }

    fn post_not_found(post_id: PostId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Post {} not found", post_id),
            ErrorContext::new(operation)
                .with_entity("post")
                .with_entity_id(post_id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_post(&self, entry: NewEntry) -> RepositoryResult<PostId> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "insert_post")?;

        let mut post_id = PostId::generate();
        while data.index.contains_key(&post_id) {
            post_id = PostId::generate();
        }

        let position = data.posts.len();
        data.posts.push(Post::new(post_id, entry));
        data.index.insert(post_id, position);
        Ok(post_id)
    }

    async fn list_posts(&self) -> RepositoryResult<Vec<Post>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "list_posts")?;

        // Stable sort: equal timestamps keep insertion order.
        let mut posts = data.posts.clone();
        posts.sort_by_key(|post| Reverse(post.timestamp));
        Ok(posts)
    }

    async fn get_post(&self, post_id: PostId) -> RepositoryResult<Post> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "get_post")?;

        data.index
            .get(&post_id)
            .map(|&position| data.posts[position].clone())
            .ok_or_else(|| Self::post_not_found(post_id, "get_post"))
    }

    async fn push_comment(&self, post_id: PostId, entry: NewEntry) -> RepositoryResult<CommentId> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "push_comment")?;

        let position = *data
            .index
            .get(&post_id)
            .ok_or_else(|| Self::post_not_found(post_id, "push_comment"))?;
        let post = &mut data.posts[position];

        let mut comment_id = CommentId::generate();
        while post.comments.iter().any(|c| c.id == comment_id) {
            comment_id = CommentId::generate();
        }

        post.comments.push(Comment::new(comment_id, entry));
        Ok(comment_id)
    }
}
