//! Integration tests for Basic authentication and the public endpoints.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use axum::http::StatusCode;
use axum_test::TestServer;
use http::Request;
use tower::ServiceExt;

use bookmarks_api::auth::basic::encode_basic_auth;

#[tokio::test]
async fn missing_header_is_challenged_with_realm() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/bookmarks").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    let challenge = resp.header(WWW_AUTHENTICATE);
    assert_eq!(challenge.to_str().unwrap(), "Basic realm=\"SECURITY REALM\"");

    let body: serde_json::Value = resp.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn bearer_token_is_rejected() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/bookmarks")
        .add_header(AUTHORIZATION, "Bearer abc.def.ghi")
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_credentials_are_rejected() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/bookmarks")
        .add_header(AUTHORIZATION, "Basic %%%")
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/bookmarks")
        .add_header(AUTHORIZATION, encode_basic_auth("alice", "pw2"))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn credentials_are_case_sensitive() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    for (username, password) in [("Alice", "pw1"), ("alice", "PW1")] {
        let resp = server
            .get("/bookmarks")
            .add_header(AUTHORIZATION, encode_basic_auth(username, password))
            .await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn unknown_user_is_rejected() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/bookmarks")
        .add_header(AUTHORIZATION, encode_basic_auth("mallory", "pw1"))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_credentials_are_accepted() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/bookmarks")
        .add_header(AUTHORIZATION, common::alice())
        .await;
    resp.assert_status_ok();
}

#[tokio::test]
async fn authentication_is_checked_before_the_path_id() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/bookmarks/not-a-number").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_needs_no_credentials() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/health").await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<serde_json::Value>()["status"], "ok");
}

#[tokio::test]
async fn openapi_document_lists_bookmark_routes() {
    let (app, _, _) = common::test_app().await;
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/openapi.json").await;
    resp.assert_status_ok();

    let doc: serde_json::Value = resp.json();
    assert!(doc["paths"].get("/bookmarks").is_some());
    assert!(doc["paths"].get("/bookmarks/{id}").is_some());
    assert!(doc["components"]["securitySchemes"].get("basic").is_some());
}

#[tokio::test]
async fn update_with_invalid_json_is_bad_request() {
    let (app, _, _) = common::test_app().await;

    let req = Request::builder()
        .method("PUT")
        .uri("/bookmarks/1")
        .header(AUTHORIZATION, common::alice())
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_without_json_content_type_is_unsupported() {
    let (app, _, _) = common::test_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/bookmarks")
        .header(AUTHORIZATION, common::alice())
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("https://x.test"))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn update_without_json_content_type_is_unsupported() {
    let (app, _, _) = common::test_app().await;

    let req = Request::builder()
        .method("PUT")
        .uri("/bookmarks/1")
        .header(AUTHORIZATION, common::alice())
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("{\"url\":\"https://x.test\"}"))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
