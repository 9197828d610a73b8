use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use quill_core::rules::PublishPolicy;
use quill_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};
use quill_shared::dto::{AuthResponse, PostResponse};

use super::{configure_app, not_found};
use crate::observability::{REQUEST_ID_HEADER, RequestIdMiddleware};
use crate::state::AppState;

fn state_with(policy: PublishPolicy) -> AppState {
    AppState::from_parts(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(JwtTokenService::new(JwtConfig::default())),
        Arc::new(Argon2PasswordService::new()),
        policy,
    )
}

fn state() -> AppState {
    state_with(PublishPolicy::default())
}

macro_rules! app {
    ($state:expr) => {{
        let state = $state;
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .configure(|cfg| configure_app(cfg, state))
                .default_service(web::to(not_found)),
        )
        .await
    }};
}

macro_rules! signup {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/signup/")
            .set_json(json!({
                "username": $username,
                "email": format!("{}@example.com", $username),
                "password": "secret123",
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: AuthResponse = test::read_body_json(resp).await;
        body
    }};
}

macro_rules! create_post {
    ($app:expr, $token:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/posts/create/")
            .insert_header(bearer(&$token))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: PostResponse = test::read_body_json(resp).await;
        post
    }};
}

macro_rules! get_json {
    ($app:expr, $token:expr, $uri:expr) => {{
        let req = test::TestRequest::get()
            .uri($uri)
            .insert_header(("Host", "blog.example"))
            .insert_header(bearer(&$token))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

fn result_ids(page: &Value) -> Vec<String> {
    page["results"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_signup_and_duplicate_username() {
    let app = app!(state());
    let auth = signup!(app, "alice");
    assert!(!auth.token.is_empty());
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.user.username, "alice");
    assert_eq!(auth.user.email, "alice@example.com");

    let req = test::TestRequest::post()
        .uri("/signup/")
        .set_json(json!({"username": "alice", "password": "another1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["username"][0],
        "A user with that username already exists."
    );
}

#[actix_web::test]
async fn test_signup_collects_field_errors() {
    let app = app!(state());
    let req = test::TestRequest::post()
        .uri("/signup/")
        .set_json(json!({"username": "bad name!", "password": "123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["username"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[actix_web::test]
async fn test_login_outcomes() {
    let app = app!(state());
    signup!(app, "bob");

    let login = |body: Value| {
        test::TestRequest::post()
            .uri("/login/")
            .set_json(body)
            .to_request()
    };

    let resp = test::call_service(&app, login(json!({"username": "bob"}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "username and password required");

    let resp = test::call_service(
        &app,
        login(json!({"username": "bob", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "invalid credentials");

    let resp = test::call_service(
        &app,
        login(json!({"username": "nobody", "password": "secret123"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        login(json!({"username": "bob", "password": "secret123"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let auth: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(auth.user.username, "bob");

    // The legacy "Token" scheme is accepted too.
    let req = test::TestRequest::get()
        .uri("/posts/mine/")
        .insert_header(("Authorization", format!("Token {}", auth.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = app!(state());
    for uri in ["/posts/mine/", "/feed/", "/timeline/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let (status, _) = get_json!(app, "not-a-jwt", "/timeline/");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_stamps_only_published_posts() {
    let app = app!(state());
    let auth = signup!(app, "carol");

    let published = create_post!(
        app,
        auth.token,
        json!({"title": "Live", "content": "body", "is_draft": false})
    );
    assert!(!published.is_draft);
    assert_eq!(published.published_at, Some(published.created_at));
    assert_eq!(published.author.username, "carol");

    let draft = create_post!(
        app,
        auth.token,
        json!({"title": "Draft", "content": "body", "is_draft": true})
    );
    assert!(draft.is_draft);
    assert_eq!(draft.published_at, None);

    let implicit = create_post!(app, auth.token, json!({"title": "Implicit", "content": "x"}));
    assert!(implicit.is_draft);
    assert_eq!(implicit.published_at, None);
}

#[actix_web::test]
async fn test_create_rejects_invalid_fields() {
    let app = app!(state());
    let auth = signup!(app, "dave");

    let req = test::TestRequest::post()
        .uri("/posts/create/")
        .insert_header(bearer(&auth.token))
        .set_json(json!({"title": "x".repeat(201), "content": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["title"].is_array());
    assert!(body["errors"]["content"].is_array());
}

#[actix_web::test]
async fn test_update_publish_transitions() {
    let app = app!(state());
    let auth = signup!(app, "erin");
    let draft = create_post!(app, auth.token, json!({"title": "T", "content": "C"}));

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}/", draft.id))
        .insert_header(bearer(&auth.token))
        .set_json(json!({"is_draft": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let published: PostResponse = test::read_body_json(resp).await;
    assert!(!published.is_draft);
    let stamped = published.published_at.expect("publishing stamps published_at");
    assert!(stamped >= draft.created_at);

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}/", draft.id))
        .insert_header(bearer(&auth.token))
        .set_json(json!({"title": "Renamed"}))
        .to_request();
    let renamed: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(renamed.title, "Renamed");
    assert_eq!(renamed.published_at, Some(stamped));
}

#[actix_web::test]
async fn test_update_null_clears_published_at() {
    let app = app!(state());
    let auth = signup!(app, "fay");
    let post = create_post!(
        app,
        auth.token,
        json!({"title": "T", "content": "C", "is_draft": false})
    );

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}/", post.id))
        .insert_header(bearer(&auth.token))
        .set_json(json!({"is_draft": true, "published_at": null}))
        .to_request();
    let updated: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert!(updated.is_draft);
    assert_eq!(updated.published_at, None);
}

#[actix_web::test]
async fn test_republish_with_null_published_at_keeps_first_stamp() {
    let app = app!(state());
    let auth = signup!(app, "gina");
    let post = create_post!(
        app,
        auth.token,
        json!({"title": "T", "content": "C", "is_draft": false})
    );
    let uri = format!("/posts/{}/", post.id);

    for body in [
        json!({"is_draft": true}),
        json!({"is_draft": false, "published_at": null}),
    ] {
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&auth.token))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let (_, body) = get_json!(app, auth.token, &uri);
    let republished: PostResponse = serde_json::from_value(body).unwrap();
    assert!(!republished.is_draft);
    assert_eq!(republished.published_at, post.published_at);
}

#[actix_web::test]
async fn test_publish_with_explicit_published_at() {
    let app = app!(state());
    let auth = signup!(app, "hugo");
    let draft = create_post!(app, auth.token, json!({"title": "T", "content": "C"}));

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}/", draft.id))
        .insert_header(bearer(&auth.token))
        .set_json(json!({"is_draft": false, "published_at": "2023-03-04T05:06:07Z"}))
        .to_request();
    let published: PostResponse = test::call_and_read_body_json(&app, req).await;

    let expected: DateTime<Utc> = "2023-03-04T05:06:07Z".parse().unwrap();
    assert!(!published.is_draft);
    assert_eq!(published.published_at, Some(expected));
}

#[actix_web::test]
async fn test_republish_under_both_policies() {
    for (policy, restamps) in [
        (PublishPolicy::FirstPublishOnly, false),
        (PublishPolicy::EveryPublish, true),
    ] {
        let app = app!(state_with(policy));
        let auth = signup!(app, "gus");
        let post = create_post!(
            app,
            auth.token,
            json!({"title": "T", "content": "C", "is_draft": false})
        );
        let first = post.published_at;

        for is_draft in [true, false] {
            let req = test::TestRequest::put()
                .uri(&format!("/posts/{}/", post.id))
                .insert_header(bearer(&auth.token))
                .set_json(json!({ "is_draft": is_draft }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let (_, body) = get_json!(app, auth.token, &format!("/posts/{}/", post.id));
        let republished: PostResponse = serde_json::from_value(body).unwrap();
        assert_eq!(republished.published_at != first, restamps, "{:?}", policy);
    }
}

#[actix_web::test]
async fn test_draft_visibility_and_ownership() {
    let app = app!(state());
    let owner = signup!(app, "hana");
    let other = signup!(app, "ivan");
    let draft = create_post!(app, owner.token, json!({"title": "Secret", "content": "C"}));
    let live = create_post!(
        app,
        owner.token,
        json!({"title": "Public", "content": "C", "is_draft": false})
    );

    let uri = format!("/posts/{}/", draft.id);
    let (status, _) = get_json!(app, other.token, &uri);
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = get_json!(app, owner.token, &uri);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Secret");

    let (status, _) = get_json!(app, other.token, &format!("/posts/{}/", live.id));
    assert_eq!(status, StatusCode::OK);

    for post in [&draft, &live] {
        let uri = format!("/posts/{}/", post.id);
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&other.token))
            .set_json(json!({"title": "Hijacked"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&other.token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    // Ownership is checked before validation.
    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}/", live.id))
        .insert_header(bearer(&other.token))
        .set_json(json!({"title": ""}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_delete_then_missing() {
    let app = app!(state());
    let auth = signup!(app, "jade");
    let post = create_post!(app, auth.token, json!({"title": "T", "content": "C"}));
    let uri = format!("/posts/{}/", post.id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&auth.token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let (status, _) = get_json!(app, auth.token, &uri);
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&auth.token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_malformed_post_id_is_not_found() {
    let app = app!(state());
    let auth = signup!(app, "kai");
    let (status, body) = get_json!(app, auth.token, "/posts/not-a-uuid/");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[actix_web::test]
async fn test_mine_filters_drafts() {
    let app = app!(state());
    let auth = signup!(app, "lena");
    let other = signup!(app, "milo");
    let draft = create_post!(app, auth.token, json!({"title": "D", "content": "C"}));
    create_post!(
        app,
        auth.token,
        json!({"title": "P", "content": "C", "is_draft": false})
    );
    create_post!(
        app,
        other.token,
        json!({"title": "X", "content": "C", "is_draft": false})
    );

    let (status, all) = get_json!(app, auth.token, "/posts/mine/");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (_, drafts) = get_json!(app, auth.token, "/posts/mine/?drafts=TRUE");
    let drafts = drafts.as_array().cloned().unwrap_or_default();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0]["id"], draft.id.to_string());

    let (_, unfiltered) = get_json!(app, auth.token, "/posts/mine/?drafts=no");
    assert_eq!(unfiltered.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn test_feed_and_timeline_membership() {
    let app = app!(state());
    let me = signup!(app, "nina");
    let them = signup!(app, "omar");

    let mine = create_post!(
        app,
        me.token,
        json!({"title": "Mine", "content": "C", "is_draft": false})
    );
    let theirs = create_post!(
        app,
        them.token,
        json!({"title": "Theirs", "content": "C", "is_draft": false})
    );
    create_post!(app, me.token, json!({"title": "My draft", "content": "C"}));
    create_post!(app, them.token, json!({"title": "Their draft", "content": "C"}));

    let (status, feed) = get_json!(app, me.token, "/feed/");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["count"], 1);
    assert_eq!(result_ids(&feed), vec![theirs.id.to_string()]);

    let (_, timeline) = get_json!(app, me.token, "/timeline/");
    assert_eq!(timeline["count"], 2);
    assert_eq!(
        result_ids(&timeline),
        vec![theirs.id.to_string(), mine.id.to_string()]
    );
    assert!(timeline["next"].is_null());
    assert!(timeline["previous"].is_null());
}

#[actix_web::test]
async fn test_feed_pagination() {
    let app = app!(state());
    let reader = signup!(app, "pia");
    let writer = signup!(app, "quin");
    for i in 0..6 {
        create_post!(
            app,
            writer.token,
            json!({"title": format!("Post {}", i), "content": "C", "is_draft": false})
        );
    }

    let (status, first) = get_json!(app, reader.token, "/feed/");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["count"], 6);
    assert_eq!(result_ids(&first).len(), 5);
    assert_eq!(first["next"], "http://blog.example/feed/?page=2");
    assert!(first["previous"].is_null());

    let stamps: Vec<DateTime<Utc>> = first["results"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["published_at"].as_str()?.parse().ok())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(stamps.len(), 5);
    let mut sorted = stamps.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(stamps, sorted);

    let (status, second) = get_json!(app, reader.token, "/feed/?page=2");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&second).len(), 1);
    assert!(second["next"].is_null());
    assert_eq!(second["previous"], "http://blog.example/feed/");

    let (_, last) = get_json!(app, reader.token, "/feed/?page=last");
    assert_eq!(result_ids(&last), result_ids(&second));

    for uri in ["/feed/?page=3", "/feed/?page=0", "/feed/?page=abc"] {
        let (status, body) = get_json!(app, reader.token, uri);
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["detail"], "Invalid page.");
    }

    // Six posts fit on a single timeline page.
    let (_, timeline) = get_json!(app, reader.token, "/timeline/");
    assert_eq!(result_ids(&timeline).len(), 6);
    let (status, _) = get_json!(app, reader.token, "/timeline/?page=2");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_empty_feed_first_page() {
    let app = app!(state());
    let auth = signup!(app, "rosa");
    let (status, body) = get_json!(app, auth.token, "/feed/");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert!(result_ids(&body).is_empty());
}

#[actix_web::test]
async fn test_draft_and_published_walkthrough() {
    let app = app!(state());
    let a = signup!(app, "author_a");
    let b = signup!(app, "author_b");

    let p1 = create_post!(
        app,
        a.token,
        json!({"title": "P1", "content": "C", "is_draft": true})
    );
    let p2 = create_post!(
        app,
        a.token,
        json!({"title": "P2", "content": "C", "is_draft": false})
    );

    let (_, mine) = get_json!(app, a.token, "/posts/mine/");
    let mut mine_ids: Vec<String> = mine
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();
    mine_ids.sort();
    let mut expected = vec![p1.id.to_string(), p2.id.to_string()];
    expected.sort();
    assert_eq!(mine_ids, expected);

    let (_, feed) = get_json!(app, b.token, "/feed/");
    assert_eq!(result_ids(&feed), vec![p2.id.to_string()]);

    let (_, timeline) = get_json!(app, b.token, "/timeline/");
    assert_eq!(result_ids(&timeline), vec![p2.id.to_string()]);

    let (status, _) = get_json!(app, b.token, &format!("/posts/{}/", p1.id));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_unknown_route_and_bad_json() {
    let app = app!(state());

    let req = test::TestRequest::get().uri("/health/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "in-memory");

    let req = test::TestRequest::get()
        .uri("/nowhere/")
        .insert_header((REQUEST_ID_HEADER, "req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["request_id"], "req-42");

    let req = test::TestRequest::post()
        .uri("/signup/")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_query_and_domain_errors_carry_request_id() {
    let app = app!(state());
    let ivy = signup!(app, "ivy");

    let req = test::TestRequest::get()
        .uri("/feed/?page=1&page=2")
        .insert_header(bearer(&ivy.token))
        .insert_header((REQUEST_ID_HEADER, "req-query"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["request_id"], "req-query");

    let req = test::TestRequest::get()
        .uri("/posts/not-a-uuid/")
        .insert_header(bearer(&ivy.token))
        .insert_header((REQUEST_ID_HEADER, "req-missing"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["request_id"], "req-missing");

    let req = test::TestRequest::get()
        .uri("/posts/mine/")
        .insert_header((REQUEST_ID_HEADER, "req-anon"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["request_id"], "req-anon");
}

#[cfg(feature = "rate-limit")]
#[actix_web::test]
async fn test_credential_endpoints_are_rate_limited() {
    use quill_infra::{InMemoryRateLimiter, RateLimitConfig};
    use std::time::Duration;

    let limiter = InMemoryRateLimiter::new(RateLimitConfig {
        max_requests: 2,
        window: Duration::from_secs(60),
    });
    let app = app!(state().with_rate_limiter(Arc::new(limiter)));

    let login = || {
        test::TestRequest::post()
            .uri("/login/")
            .set_json(json!({"username": "ghost", "password": "secret123"}))
            .to_request()
    };
    for _ in 0..2 {
        let resp = test::call_service(&app, login()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let resp = test::call_service(&app, login()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("Retry-After"));

    // Other routes are unaffected.
    let req = test::TestRequest::get().uri("/health/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
