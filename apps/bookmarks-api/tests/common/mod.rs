#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;

use bookmarks_api::auth::basic::encode_basic_auth;
use bookmarks_api::config::Config;
use bookmarks_api::db::memory::MemoryStore;
use bookmarks_api::db::store::Store;
use bookmarks_api::models::user::{NewUser, User};
use bookmarks_api::AppState;

/// The two users every test state is seeded with.
pub struct Users {
    pub alice: User,
    pub bob: User,
}

/// Build a test AppState over an in-memory store seeded with alice/pw1 and
/// bob/pw2.
pub async fn test_state() -> (AppState, Users) {
    let store = Arc::new(MemoryStore::new());
    let alice = store
        .create_user(NewUser::new("alice", "pw1"))
        .await
        .expect("seed alice");
    let bob = store
        .create_user(NewUser::new("bob", "pw2"))
        .await
        .expect("seed bob");

    let state = AppState {
        store,
        config: Arc::new(Config::memory()),
    };

    (state, Users { alice, bob })
}

/// Build the full application router wired to the test state.
pub async fn test_app() -> (Router, AppState, Users) {
    let (state, users) = test_state().await;
    let app = bookmarks_api::routes::router().with_state(state.clone());
    (app, state, users)
}

pub fn alice() -> String {
    encode_basic_auth("alice", "pw1")
}

pub fn bob() -> String {
    encode_basic_auth("bob", "pw2")
}

/// Create a bookmark as the given user and return the response body.
pub async fn create_bookmark(
    server: &axum_test::TestServer,
    auth: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let resp = server
        .post("/bookmarks")
        .add_header(axum::http::header::AUTHORIZATION, auth.to_string())
        .json(&body)
        .await;
    resp.assert_status(axum::http::StatusCode::CREATED);
    resp.json::<serde_json::Value>()
}
