//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{NewPost, PostChanges};
use quill_shared::dto::{CreatePostRequest, MyPostsQuery, UpdatePostRequest};

use super::{embed_authors, post_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /posts/create/
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::debug!(username = %identity.username, "Creating post");
    let post = state
        .posts
        .create(
            identity.user_id,
            NewPost {
                title: req.title,
                content: req.content,
                is_draft: req.is_draft,
                published_at: req.published_at,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(post_response(&state, post).await?))
}

/// GET /posts/mine/?drafts=true
pub async fn mine(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<MyPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .list_mine(identity.user_id, query.drafts_only())
        .await?;

    Ok(HttpResponse::Ok().json(embed_authors(&state, posts).await?))
}

/// GET /posts/{id}/
pub async fn get(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = post_id(&path)?;
    let post = state.posts.get(identity.user_id, id).await?;

    Ok(HttpResponse::Ok().json(post_response(&state, post).await?))
}

/// PUT /posts/{id}/ - partial update, author only.
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = post_id(&path)?;
    let req = body.into_inner();
    let post = state
        .posts
        .update(
            identity.user_id,
            id,
            PostChanges {
                title: req.title,
                content: req.content,
                is_draft: req.is_draft,
                published_at: req.published_at,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(&state, post).await?))
}

/// DELETE /posts/{id}/ - author only.
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = post_id(&path)?;
    state.posts.delete(identity.user_id, id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// A path segment that is not a UUID cannot name a post.
fn post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Not found.".to_string()))
}
