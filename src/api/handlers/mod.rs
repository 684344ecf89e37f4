//! HTTP handlers and the error type they share.

pub mod health;
pub mod navigation;
pub mod types;

use crate::auth::AuthError;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use regex::Regex;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    MissingToken,
    Auth(AuthError),
    BadRequest(String),
    Forbidden(&'static str),
    NotFound(&'static str),
    Unavailable(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken => {
                (StatusCode::UNAUTHORIZED, "Missing bearer token").into_response()
            }
            Self::Auth(err) => err.into_response(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            Self::Unavailable(detail) => {
                error!("Dependency unavailable: {}", detail);
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable").into_response()
            }
        }
    }
}

/// Extract the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// BCP 47-ish language tag such as `en`, `es-MX` or `pt_BR`.
pub fn valid_locale(tag: &str) -> bool {
    Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{2,8})*$").is_ok_and(|re| re.is_match(tag))
}
