//! Foo HTTP Routes
//!
//! JSON CRUD endpoints. Mounted behind the access guard.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult, FooOperation};
use super::server::AppState;
use crate::auth::Claims;
use crate::store::Foo;

/// Foo routes; the caller applies the access guard
pub fn foo_routes() -> Router<AppState> {
    Router::new()
        .route("/foos", get(list_handler).post(create_handler).delete(delete_handler))
        .route("/foos/:id", put(update_handler))
}

// ==================
// Request/Response Types
// ==================

/// Body of create and update requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooPayload {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Handlers
// ==================

/// List every foo
async fn list_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<Foo>>> {
    tracing::debug!(email = %claims.email, "Listing foos");

    let foos = state
        .service
        .list()
        .await
        .map_err(|e| ApiError::from_service(FooOperation::List, None, e))?;
    Ok(Json(foos))
}

/// Create a foo
async fn create_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<FooPayload>, JsonRejection>,
) -> ApiResult<Json<Foo>> {
    let Json(payload) = payload.map_err(ApiError::InvalidBody)?;
    tracing::debug!(email = %claims.email, "Creating foo");

    let foo = state
        .service
        .create(&payload.name)
        .await
        .map_err(|e| ApiError::from_service(FooOperation::Create, None, e))?;
    Ok(Json(foo))
}

/// Delete every foo
async fn delete_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<MessageResponse>> {
    tracing::debug!(email = %claims.email, "Deleting all foos");

    let deleted = state
        .service
        .delete_all()
        .await
        .map_err(|e| ApiError::from_service(FooOperation::Delete, None, e))?;

    Ok(Json(MessageResponse {
        message: format!("{deleted} foos deleted."),
    }))
}

/// Rename a foo
async fn update_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FooPayload>, JsonRejection>,
) -> ApiResult<Json<Foo>> {
    let Path(id) = id.map_err(ApiError::InvalidId)?;
    let Json(payload) = payload.map_err(ApiError::InvalidBody)?;
    tracing::debug!(email = %claims.email, id, "Updating foo");

    let foo = state
        .service
        .update_by_id(id, &payload.name)
        .await
        .map_err(|e| ApiError::from_service(FooOperation::Update, Some(id), e))?;
    Ok(Json(foo))
}
