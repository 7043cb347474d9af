//! # HTTP Server
//!
//! Combines the login flow and the guarded foo routes into one router and
//! runs it until a shutdown signal arrives.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::foo_routes::foo_routes;
use super::guard::require_bearer;
use crate::auth::OidcClient;
use crate::service::FooService;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub service: FooService,
    pub oidc: Arc<OidcClient>,
}

impl AppState {
    pub fn new(service: FooService, oidc: Arc<OidcClient>) -> Self {
        Self { service, oidc }
    }
}

/// HTTP server for the foo service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves, then drain for the grace window
    pub async fn start<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let HttpServer { config, router } = self;
        let addr: SocketAddr = config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {}: {e}", config.socket_addr()),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %addr, "Listening");

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        tokio::select! {
            result = &mut server => return flatten(result),
            _ = shutdown => {}
        }

        let grace = config.shutdown_grace();
        tracing::info!(grace_secs = grace.as_secs(), "Shutdown signal received, draining");
        let _ = stop_tx.send(());

        match tokio::time::timeout(grace, &mut server).await {
            Ok(result) => flatten(result),
            Err(_) => {
                tracing::warn!("Grace window elapsed, aborting open connections");
                server.abort();
                Ok(())
            }
        }
    }
}

fn flatten(
    result: Result<Result<(), std::io::Error>, tokio::task::JoinError>,
) -> Result<(), std::io::Error> {
    result.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
    // Configure CORS from config
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let guarded = foo_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_bearer,
    ));

    Router::new()
        .merge(auth_routes())
        .merge(guarded)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ProviderMetadata;
    use crate::config::OidcConfig;
    use crate::store::InMemoryFooStore;
    use jsonwebtoken::jwk::JwkSet;

    fn state() -> AppState {
        let config = OidcConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            provider_url: "https://issuer.test".to_string(),
            redirect_url: "http://localhost:3000/callback".to_string(),
            scopes: vec!["openid".to_string()],
        };
        let metadata = ProviderMetadata {
            issuer: "https://issuer.test".to_string(),
            authorization_endpoint: "https://issuer.test/authorize".to_string(),
            token_endpoint: "https://issuer.test/token".to_string(),
            jwks_uri: "https://issuer.test/jwks".to_string(),
        };
        let oidc = OidcClient::new(config, metadata, JwkSet { keys: vec![] }).unwrap();
        AppState::new(FooService::new(Arc::new(InMemoryFooStore::new())), Arc::new(oidc))
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::with_config(config, state());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_shutdown_before_traffic_returns_cleanly() {
        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        };
        let server = HttpServer::with_config(config, state());

        let result = server.start(async {}).await;
        assert!(result.is_ok());
    }
}
