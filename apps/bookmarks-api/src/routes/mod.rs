pub mod bookmarks;
pub mod health;

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route("/openapi.json", get(openapi))
        .merge(bookmarks::router())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        bookmarks::list_bookmarks,
        bookmarks::get_bookmark,
        bookmarks::create_bookmark,
        bookmarks::update_bookmark,
        bookmarks::delete_bookmark,
    ),
    components(
        schemas(
            crate::error::ApiErrorBody,
            crate::error::ApiErrorDetail,
            crate::error::FieldError,
            crate::models::bookmark::Bookmark,
            crate::models::bookmark::BookmarkPatch,
            health::HealthResponse,
            bookmarks::CreateBookmarkRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Bookmarks", description = "Bookmarks owned by the authenticated user"),
    )
)]
pub struct ApiDoc;
