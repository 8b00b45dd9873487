//! Post endpoints: feed, likes and comments

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{validated, ApiError, Json, SuccessResponse};
use crate::domain::post::{Comment, Like, Post, PostId};
use crate::domain::user::UserId;
use crate::domain::validation::validate_post_input;
use crate::domain::DomainError;
use crate::infrastructure::post::PostRequest;

/// Create the posts router
pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_post).delete(delete_post))
        .route("/like/{id}", post(like))
        .route("/unlike/{id}", post(unlike))
        .route("/comment/{id}", post(comment))
        .route("/comment/{id}/{comment_id}", delete(delete_comment))
}

/// Post as returned to clients, without the storage version
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub user: UserId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user: post.user,
            text: post.text,
            name: post.name,
            avatar: post.avatar,
            likes: post.likes,
            comments: post.comments,
            date: post.date,
        }
    }
}

/// GET /api/posts
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state.post_service.list().await.map_err(|e| match e {
        DomainError::Storage { .. } => ApiError::bad_request("nopostsfound", "No posts found"),
        other => ApiError::from(other),
    })?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.post_service.get(&PostId::new(id)).await?;
    Ok(Json(post.into()))
}

/// POST /api/posts
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<Value>,
) -> Result<Json<PostResponse>, ApiError> {
    let request: PostRequest = validated(body, validate_post_input)?;
    let post = state.post_service.create(user.id(), request).await?;
    Ok(Json(post.into()))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.post_service.delete(&PostId::new(id), user.id()).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/posts/like/{id}
pub async fn like(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.post_service.like(&PostId::new(id), user.id()).await?;
    Ok(Json(post.into()))
}

/// POST /api/posts/unlike/{id}
pub async fn unlike(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.post_service.unlike(&PostId::new(id), user.id()).await?;
    Ok(Json(post.into()))
}

/// POST /api/posts/comment/{id}
pub async fn comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<PostResponse>, ApiError> {
    let request: PostRequest = validated(body, validate_post_input)?;
    let post = state
        .post_service
        .comment(&PostId::new(id), user.id(), request)
        .await?;
    Ok(Json(post.into()))
}

/// DELETE /api/posts/comment/{id}/{comment_id}
///
/// Only the comment's author may remove it.
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .post_service
        .delete_comment(&PostId::new(id), &comment_id, user.id())
        .await?;
    Ok(Json(post.into()))
}
