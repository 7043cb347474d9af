//! # Access Guard
//!
//! Route layer for protected routes. Every request must carry
//! `Authorization: Bearer <id token>`; the token is verified against the
//! provider keys on each call and the resulting [`Claims`] are placed in the
//! request extensions for the handler.
//!
//! [`Claims`]: crate::auth::Claims

use axum::extract::{Request, State};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use super::errors::ApiError;
use super::server::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Reject the request unless it carries a verified bearer assertion
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(ApiError::MissingBearer)?;

    let verified = state.oidc.verify(token).map_err(ApiError::from_auth)?;
    let claims = verified.claims().map_err(ApiError::from_auth)?;

    tracing::debug!(subject = ?verified.subject(), "Bearer assertion verified");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Token part of a `Bearer` Authorization header, if well formed
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
