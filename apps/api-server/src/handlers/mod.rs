//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::ports::BaseRepository;
use quill_shared::dto::{PostResponse, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Register shared state, body parsing rules and every route.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: AppState) {
    let rate_limit = RateLimitMiddleware::new(state.rate_limiter.clone());
    cfg.app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));
    configure_routes(cfg, rate_limit);
}

/// Configure all application routes. `rate_limit` guards the credential endpoints.
pub fn configure_routes(cfg: &mut web::ServiceConfig, rate_limit: RateLimitMiddleware) {
    cfg
        // Public routes
        .route("/health/", web::get().to(health::health_check))
        .service(
            web::resource("/signup/")
                .wrap(rate_limit.clone())
                .route(web::post().to(auth::signup)),
        )
        .service(
            web::resource("/login/")
                .wrap(rate_limit)
                .route(web::post().to(auth::login)),
        )
        // Token-protected routes
        .route("/posts/create/", web::post().to(posts::create))
        .route("/posts/mine/", web::get().to(posts::mine))
        .service(
            web::resource("/posts/{id}/")
                .route(web::get().to(posts::get))
                .route(web::put().to(posts::update))
                .route(web::delete().to(posts::delete)),
        )
        .route("/feed/", web::get().to(feed::others_feed))
        .route("/timeline/", web::get().to(feed::timeline));
}

/// Fallback for unknown routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    AppError::NotFound(format!("No route for {} {}", req.method(), req.path())).error_response()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

fn to_response(post: Post, author: UserResponse) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        is_draft: post.is_draft,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
        author,
    }
}

/// Render a single post with its author embedded.
async fn post_response(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| missing_author(&post))?;
    Ok(to_response(post, user_response(&author)))
}

/// Render a listing, looking up every distinct author once.
async fn embed_authors(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let mut ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let authors: HashMap<Uuid, UserResponse> = state
        .users
        .find_by_ids(&ids)
        .await?
        .iter()
        .map(|user| (user.id, user_response(user)))
        .collect();

    posts
        .into_iter()
        .map(|post| match authors.get(&post.author_id) {
            Some(author) => Ok(to_response(post, author.clone())),
            None => Err(missing_author(&post)),
        })
        .collect()
}

fn missing_author(post: &Post) -> AppError {
    AppError::Internal(format!(
        "author {} of post {} does not exist",
        post.author_id, post.id
    ))
}
