use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::schema::posts;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Comment, CommentId, Post, PostId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: Uuid,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub comments: Value,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow {
    pub id: Uuid,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub comments: Value,
}

/// A comment as embedded in the `posts.comments` JSONB array.
///
/// `_id` is the store-side key; it is mapped to the public `id` on the way out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.value(),
            content: comment.content.clone(),
            timestamp: comment.timestamp,
        }
    }
}

impl From<CommentDocument> for Comment {
    fn from(doc: CommentDocument) -> Self {
        Self {
            id: CommentId(doc.id),
            content: doc.content,
            timestamp: doc.timestamp,
        }
    }
}

impl TryFrom<PostRow> for Post {
    type Error = RepositoryError;

    fn try_from(row: PostRow) -> RepositoryResult<Self> {
        let comments: Vec<CommentDocument> =
            serde_json::from_value(row.comments).map_err(|e| {
                RepositoryError::internal_with_context(
                    format!("Malformed embedded comments: {}", e),
                    ErrorContext::new("decode_post")
                        .with_entity("post")
                        .with_entity_id(row.id),
                )
            })?;

        Ok(Post {
            id: PostId(row.id),
            content: row.content,
            timestamp: row.posted_at,
            comments: comments.into_iter().map(Comment::from).collect(),
        })
    }
}
