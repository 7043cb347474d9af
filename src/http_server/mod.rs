//! # HTTP Server Module
//!
//! Axum router for the foo service.
//!
//! # Endpoints
//!
//! - `/` - Home page
//! - `/login` - Redirect to the identity provider
//! - `/callback` - Provider callback, sets the `jwt_token` cookie
//! - `/foos`, `/foos/:id` - CRUD, behind the bearer access guard

pub mod auth_routes;
pub mod config;
pub mod errors;
pub mod foo_routes;
pub mod guard;
pub mod server;
pub mod views;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, shutdown_signal, AppState, HttpServer};
