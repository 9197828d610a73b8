//! Feed and timeline handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::domain::Post;
use quill_core::pagination::{Page, PageRequest};
use quill_shared::PaginatedResponse;
use quill_shared::dto::PageQuery;
use url::Url;

use super::embed_authors;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /feed/?page=N - other users' published posts.
pub async fn others_feed(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::parse(query.page.as_deref())?;
    let page = state.feeds.others_feed(identity.user_id, page).await?;
    paginated(&req, &state, page).await
}

/// GET /timeline/?page=N - everyone's published posts.
pub async fn timeline(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::parse(query.page.as_deref())?;
    let page = state.feeds.timeline(identity.user_id, page).await?;
    paginated(&req, &state, page).await
}

async fn paginated(
    req: &HttpRequest,
    state: &AppState,
    page: Page<Post>,
) -> AppResult<HttpResponse> {
    let next = page
        .next_number()
        .map(|n| page_link(req, Some(n)))
        .transpose()?;
    let previous = page
        .previous_number()
        .map(|n| page_link(req, (n > 1).then_some(n)))
        .transpose()?;
    let count = page.count;
    let results = embed_authors(state, page.items).await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        count,
        next,
        previous,
        results,
    }))
}

/// Absolute URL of the current request with `page` replaced, or removed when `None`.
fn page_link(req: &HttpRequest, page: Option<u64>) -> AppResult<String> {
    let info = req.connection_info();
    let mut url = Url::parse(&format!("{}://{}{}", info.scheme(), info.host(), req.path()))
        .map_err(|e| AppError::Internal(format!("Invalid request URL: {}", e)))?;
    url.set_query(Some(req.query_string()));

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if let Some(number) = page {
        pairs.push(("page".to_string(), number.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    Ok(url.into())
}
