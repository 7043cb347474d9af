//! # HTTP Errors
//!
//! Every failure a JSON route can return. Only this module decides the status
//! code and the message a client sees; the full source chain is logged.

use std::error::Error as StdError;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;
use crate::service::ServiceError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Failing foo operation, with its handler tag and client message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooOperation {
    List,
    Create,
    Delete,
    Update,
}

impl FooOperation {
    fn tag(self) -> &'static str {
        match self {
            FooOperation::List => "J5TSGF",
            FooOperation::Create => "QONMRA",
            FooOperation::Delete => "8HCIPG",
            FooOperation::Update => "E4LP9X",
        }
    }

    fn message(self) -> &'static str {
        match self {
            FooOperation::List => "Getting foos.",
            FooOperation::Create => "Creating foo.",
            FooOperation::Delete => "Deleting foos.",
            FooOperation::Update => "Updating foo.",
        }
    }
}

/// JSON route errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// No usable bearer credential
    #[error("Error 3R7WBW - Missing or malformed Authorization header.")]
    MissingBearer,

    /// Bearer assertion failed verification
    #[error("Error S2UU5K - Invalid or expired token.")]
    Unauthorized(#[source] AuthError),

    /// Body is not JSON or lacks a string `name`
    #[error("Error R2PB7Q - Invalid request body.")]
    InvalidBody(#[source] JsonRejection),

    /// Path id is not an integer
    #[error("Error K8ZQ3M - Invalid foo id.")]
    InvalidId(#[source] PathRejection),

    /// Update addressed an id with no row
    #[error("Error BATWXG - No foo found with given ID: {id}.")]
    NotFound {
        id: i64,
        #[source]
        source: ServiceError,
    },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Verified assertion carries unusable claims
    #[error("Error KH1NV5 - Extracting the claims.")]
    Claims(#[source] AuthError),

    /// Store or service failure
    #[error("Error {} - {}", .operation.tag(), .operation.message())]
    Service {
        operation: FooOperation,
        #[source]
        source: ServiceError,
    },
}

impl ApiError {
    /// Map a service failure for `operation`, splitting out missing ids
    pub fn from_service(operation: FooOperation, id: Option<i64>, source: ServiceError) -> Self {
        match id {
            Some(id) if source.is_not_found() => ApiError::NotFound { id, source },
            _ => ApiError::Service { operation, source },
        }
    }

    /// Map a guard failure: caller faults are unauthorized, the rest are ours
    pub fn from_auth(source: AuthError) -> Self {
        if source.is_client_error() {
            ApiError::Unauthorized(source)
        } else {
            ApiError::Claims(source)
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingBearer => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,

            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,

            ApiError::Claims(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Service { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let chain = error_chain(&self);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %chain, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %chain, "Request rejected");
        }

        let body = Json(ErrorResponse {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Render an error and all its sources on one line
pub fn error_chain(error: &dyn StdError) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
