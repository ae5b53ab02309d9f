//! Basic-credential extraction middleware.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::authenticator;
use crate::auth::basic::parse_basic_auth_header;
use crate::error::ApiError;
use crate::models::user::User;
use crate::AppState;

/// Authenticated user resolved from the `Authorization: Basic ...` header.
///
/// Credentials are checked on every request; nothing is cached between
/// requests. Use as an Axum extractor in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn handler(AuthUser { user }: AuthUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

/// Rejection returned when credentials are missing, malformed or wrong, or
/// when they could not be checked at all.
#[derive(Debug)]
pub enum AuthError {
    Unauthenticated {
        message: &'static str,
        realm: String,
    },
    Storage(ApiError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Unauthenticated { message, realm } => {
                let body = serde_json::json!({
                    "error": {
                        "code": "UNAUTHORIZED",
                        "message": message
                    }
                });
                let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
                let challenge = format!("Basic realm=\"{}\"", realm.replace('"', "'"));
                if let Ok(value) = HeaderValue::from_str(&challenge) {
                    response.headers_mut().insert(WWW_AUTHENTICATE, value);
                }
                response
            }
            AuthError::Storage(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthenticated = |message: &'static str| AuthError::Unauthenticated {
            message,
            realm: state.config.auth_realm.clone(),
        };

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("Missing Authorization header"))?;

        let credentials =
            parse_basic_auth_header(header).map_err(|e| unauthenticated(e.message()))?;

        let user = authenticator::authenticate(
            state.store.as_ref(),
            &credentials.username,
            &credentials.password,
        )
        .await
        .map_err(AuthError::Storage)?
        .ok_or_else(|| unauthenticated("Invalid username or password"))?;

        Ok(AuthUser { user })
    }
}
