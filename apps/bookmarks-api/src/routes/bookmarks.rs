//! Bookmark CRUD endpoints.
//!
//! Every route requires Basic credentials. The authenticated user is the only
//! source of ownership: lookups, updates and deletes are scoped to it, and new
//! bookmarks are always assigned to it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::middleware::AuthUser;
use crate::error::{ApiError, ApiErrorBody};
use crate::models::bookmark::{self, Bookmark, BookmarkDraft, BookmarkPatch};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark)
                .put(update_bookmark)
                .delete(delete_bookmark),
        )
}

/// A path segment that is not an integer cannot name any bookmark.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("Bookmark not found"))
}

// ---------------------------------------------------------------------------
// GET /bookmarks
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/bookmarks",
    tag = "Bookmarks",
    security(("basic" = [])),
    responses(
        (status = 200, description = "Bookmarks owned by the caller", body = Vec<Bookmark>),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
    ),
)]
pub async fn list_bookmarks(
    AuthUser { user }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let list = state.store.find_bookmarks_by_owner(user.id).await?;
    Ok(Json(list))
}

// ---------------------------------------------------------------------------
// GET /bookmarks/:id
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/bookmarks/{id}",
    tag = "Bookmarks",
    security(("basic" = [])),
    params(("id" = i32, Path, description = "Bookmark ID")),
    responses(
        (status = 200, description = "The bookmark", body = Bookmark),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 404, description = "Bookmark not found", body = ApiErrorBody),
    ),
)]
pub async fn get_bookmark(
    AuthUser { user }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, ApiError> {
    let id = parse_id(&id)?;

    let bookmark = state
        .store
        .find_bookmark(id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Bookmark not found"))?;

    Ok(Json(bookmark))
}

// ---------------------------------------------------------------------------
// POST /bookmarks
// ---------------------------------------------------------------------------

/// Read a request body. Anything but a JSON object whose `url` and
/// `description` members are strings or null is malformed, including a
/// positional array.
fn parse_object<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T, ApiError> {
    if !value.is_object() {
        return Err(ApiError::bad_request(format!("{what} must be a JSON object")));
    }

    serde_json::from_value(value)
        .map_err(|err| ApiError::bad_request(format!("Malformed {}: {err}", what.to_lowercase())))
}

/// Any owner or id sent by the client is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookmarkRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/bookmarks",
    tag = "Bookmarks",
    security(("basic" = [])),
    request_body = CreateBookmarkRequest,
    responses(
        (status = 201, description = "Bookmark created", body = Bookmark),
        (status = 400, description = "Body is not a bookmark object", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 415, description = "Body is not JSON", body = ApiErrorBody),
        (status = 422, description = "Validation failed", body = ApiErrorBody),
    ),
)]
pub async fn create_bookmark(
    AuthUser { user }: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    let Json(value) = body?;
    let body: CreateBookmarkRequest = parse_object(value, "Bookmark")?;

    bookmark::validate_fields(body.url.as_deref(), body.description.as_deref())?;

    let draft = BookmarkDraft::new(user.id, body.url.unwrap_or_default(), body.description);
    let bookmark = state.store.save_bookmark(draft).await?;

    tracing::info!(bookmark_id = bookmark.id, user_id = user.id, "bookmark created");

    Ok((StatusCode::CREATED, Json(bookmark)))
}

// ---------------------------------------------------------------------------
// PUT /bookmarks/:id
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/bookmarks/{id}",
    tag = "Bookmarks",
    security(("basic" = [])),
    params(("id" = i32, Path, description = "Bookmark ID")),
    request_body = BookmarkPatch,
    responses(
        (status = 200, description = "Bookmark updated", body = Bookmark),
        (status = 400, description = "Malformed update", body = ApiErrorBody),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 404, description = "Bookmark not found", body = ApiErrorBody),
        (status = 415, description = "Body is not JSON", body = ApiErrorBody),
        (status = 422, description = "Validation failed", body = ApiErrorBody),
    ),
)]
pub async fn update_bookmark(
    AuthUser { user }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Bookmark>, ApiError> {
    let id = parse_id(&id)?;
    let Json(value) = body?;
    let patch: BookmarkPatch = parse_object(value, "Bookmark update")?;

    let bookmark = state
        .store
        .update_bookmark(id, user.id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Bookmark not found"))?;

    tracing::info!(bookmark_id = bookmark.id, user_id = user.id, "bookmark updated");

    Ok(Json(bookmark))
}

// ---------------------------------------------------------------------------
// DELETE /bookmarks/:id
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/bookmarks/{id}",
    tag = "Bookmarks",
    security(("basic" = [])),
    params(("id" = i32, Path, description = "Bookmark ID")),
    responses(
        (status = 200, description = "The deleted bookmark", body = Bookmark),
        (status = 401, description = "Unauthorized", body = ApiErrorBody),
        (status = 404, description = "Bookmark not found", body = ApiErrorBody),
    ),
)]
pub async fn delete_bookmark(
    AuthUser { user }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, ApiError> {
    let id = parse_id(&id)?;

    let bookmark = state
        .store
        .delete_bookmark(id, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Bookmark not found"))?;

    tracing::info!(bookmark_id = bookmark.id, user_id = user.id, "bookmark deleted");

    Ok(Json(bookmark))
}
