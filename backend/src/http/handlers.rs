//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer in [`crate::db::services`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateCommentResponse, CreatePostResponse, HealthResponse, Post, Submission};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Posts
// =============================================================================

/// GET /api/posts
///
/// List every post, most recent first, with its comments embedded.
pub async fn list_posts(State(state): State<AppState>) -> HandlerResult<Vec<Post>> {
    let posts = db_services::list_posts(state.repository.as_ref())
        .await
        .map_err(AppError::with_public_message(
            "Internal server error while fetching posts",
        ))?;

    Ok(Json(posts))
}

/// POST /api/posts
///
/// Create a post from `{content, timestamp?}`.
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> CreatedResult<CreatePostResponse> {
    let Json(submission) = payload?;

    let post_id = db_services::create_post(state.repository.as_ref(), submission)
        .await
        .map_err(AppError::with_public_message(
            "Internal server error while creating post",
        ))?;

    Ok((StatusCode::CREATED, Json(CreatePostResponse::new(post_id))))
}

// =============================================================================
// Comments
// =============================================================================

/// POST /api/posts/{post_id}/comments
///
/// Append a comment from `{content, timestamp?}` to an existing post.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> CreatedResult<CreateCommentResponse> {
    let Json(submission) = payload?;

    let comment_id = db_services::add_comment(state.repository.as_ref(), &post_id, submission)
        .await
        .map_err(AppError::with_public_message(
            "Internal server error while adding comment",
        ))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCommentResponse::new(comment_id)),
    ))
}
