//! Signup and login handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::NewAccount;
use quill_core::services::Session;
use quill_shared::dto::{AuthResponse, LoginRequest, SignupRequest};

use super::user_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /signup/
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let SignupRequest {
        username,
        email,
        password,
    } = body.into_inner();

    let session = state
        .accounts
        .signup(NewAccount {
            username,
            email,
            password,
        })
        .await?;

    Ok(HttpResponse::Created().json(auth_response(session)))
}

/// POST /login/
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state
        .accounts
        .login(req.username.as_deref(), req.password.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(auth_response(session)))
}

fn auth_response(session: Session) -> AuthResponse {
    AuthResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
        user: user_response(&session.user),
    }
}
