//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are optional so that missing fields surface as field-level
//! validation errors instead of JSON parse failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// POST /signup/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /login/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user, also embedded as a post's author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// Returned by signup and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /posts/create/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

/// PUT /posts/{id}/ - every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    /// Absent: unchanged. `null`: cleared.
    #[serde(deserialize_with = "present")]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A post as returned by every post endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: UserResponse,
}

/// GET /posts/mine/?drafts=true
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MyPostsQuery {
    pub drafts: Option<String>,
}

impl MyPostsQuery {
    pub fn drafts_only(&self) -> bool {
        self.drafts
            .as_deref()
            .is_some_and(|d| d.eq_ignore_ascii_case("true"))
    }
}

/// `?page=N` on the feed and timeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}
