//! High-level database service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. Submissions are
//! validated here, before any store call, so a rejected request never writes
//! anything.
//!
//! # Usage
//!
//! ```no_run
//! use forum_backend::db::{services, repositories::LocalRepository};
//! use forum_backend::models::Submission;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let post_id = services::create_post(&repo, Submission::new("hello")).await?;
//!     services::add_comment(&repo, &post_id.to_string(), Submission::new("nice")).await?;
//!
//!     let posts = services::list_posts(&repo).await?;
//!     println!("Found {} posts", posts.len());
//!     Ok(())
//! }
//! ```

use chrono::Utc;
use log::{debug, info};
use std::str::FromStr;

use super::repository::{ErrorContext, PostRepository, RepositoryError, RepositoryResult};
use crate::models::{CommentId, EntryKind, Post, PostId, Submission};

/// Check if the store is reachable.
pub async fn health_check<R: PostRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// List all posts, most recent first.
pub async fn list_posts<R: PostRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Post>> {
    let posts = repo.list_posts().await?;
    debug!("Listed {} posts", posts.len());
    Ok(posts)
}

/// Validate a submission and persist it as a new post.
///
/// # Returns
/// * `Ok(PostId)` - The new post's identifier
/// * `Err(RepositoryError::ValidationError)` - Missing content or malformed timestamp
/// * `Err(RepositoryError)` - Any store failure
pub async fn create_post<R: PostRepository + ?Sized>(
    repo: &R,
    submission: Submission,
) -> RepositoryResult<PostId> {
    let entry = submission
        .into_entry(EntryKind::Post, Utc::now())
        .map_err(|e| RepositoryError::from(e).with_operation("create_post"))?;

    let post_id = repo.insert_post(entry).await?;
    info!("Created post {}", post_id);
    Ok(post_id)
}

/// Validate a submission and append it as a comment to the post `raw_post_id`.
///
/// Content is checked first. An identifier that does not parse is reported as
/// not-found without reaching the store.
pub async fn add_comment<R: PostRepository + ?Sized>(
    repo: &R,
    raw_post_id: &str,
    submission: Submission,
) -> RepositoryResult<CommentId> {
    let entry = submission
        .into_entry(EntryKind::Comment, Utc::now())
        .map_err(|e| RepositoryError::from(e).with_operation("add_comment"))?;

    let post_id = PostId::from_str(raw_post_id).map_err(|_| {
        RepositoryError::not_found_with_context(
            format!("Post {} not found", raw_post_id),
            ErrorContext::new("add_comment")
                .with_entity("post")
                .with_entity_id(raw_post_id)
                .with_details("malformed id"),
        )
    })?;

    let comment_id = repo.push_comment(post_id, entry).await?;
    info!("Added comment {} to post {}", comment_id, post_id);
    Ok(comment_id)
}
