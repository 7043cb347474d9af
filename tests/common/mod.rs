//! Shared fixtures for foopoc integration tests.
//!
//! Provides RSA fixture keys, ID token signing, provider clients built from
//! parts and a router over the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use foopoc::auth::{OidcClient, ProviderMetadata};
use foopoc::config::{OidcConfig, DEFAULT_SCOPES};
use foopoc::http_server::{build_router, AppState, HttpServerConfig};
use foopoc::service::FooService;
use foopoc::store::InMemoryFooStore;

pub const CLIENT_ID: &str = "foopoc-test-client";
pub const CLIENT_SECRET: &str = "foopoc-test-secret";
pub const REDIRECT_URI: &str = "http://localhost:3000/callback";
pub const KEY_ID: &str = "provider-key-1";

/// Issuer used when no mock server is involved
pub const STATIC_ISSUER: &str = "https://issuer.test";

pub const PROVIDER_KEY: &[u8] = include_bytes!("../fixtures/provider_key.pem");
pub const ROGUE_KEY: &[u8] = include_bytes!("../fixtures/rogue_key.pem");
pub const PROVIDER_JWKS: &str = include_str!("../fixtures/provider_jwks.json");

// =============================================================================
// Tokens
// =============================================================================

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}

pub fn provider_jwks() -> JwkSet {
    serde_json::from_str(PROVIDER_JWKS).expect("fixture JWKS parses")
}

pub fn id_token_payload(issuer: &str) -> Value {
    json!({
        "iss": issuer,
        "aud": CLIENT_ID,
        "sub": "108234",
        "iat": now(),
        "exp": now() + 3600,
        "name": "Ada Lovelace",
        "email": "ada@example.com"
    })
}

/// Sign `payload` with RS256 under the fixture key id
pub fn sign_token(key: &[u8], payload: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KEY_ID.to_string());
    let key = EncodingKey::from_rsa_pem(key).expect("fixture key parses");
    encode(&header, payload, &key).expect("token signs")
}

/// A token the static provider accepts
pub fn valid_token() -> String {
    sign_token(PROVIDER_KEY, &id_token_payload(STATIC_ISSUER))
}

// =============================================================================
// Provider
// =============================================================================

pub fn oidc_config(provider_url: &str) -> OidcConfig {
    OidcConfig {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        provider_url: provider_url.to_string(),
        redirect_url: REDIRECT_URI.to_string(),
        scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn metadata_for(base: &str) -> ProviderMetadata {
    ProviderMetadata {
        issuer: base.to_string(),
        authorization_endpoint: format!("{base}/authorize"),
        token_endpoint: format!("{base}/token"),
        jwks_uri: format!("{base}/jwks"),
    }
}

/// Client for a provider at `base`, built without discovery
pub fn oidc_client(base: &str) -> OidcClient {
    OidcClient::new(oidc_config(base), metadata_for(base), provider_jwks())
        .expect("client builds")
}

/// Discovery document a mock provider at `base` serves
pub fn discovery_document(base: &str) -> Value {
    json!({
        "issuer": base,
        "authorization_endpoint": format!("{base}/authorize"),
        "token_endpoint": format!("{base}/token"),
        "jwks_uri": format!("{base}/jwks"),
        "response_types_supported": ["code"],
        "subject_types_supported": ["public"],
        "id_token_signing_alg_values_supported": ["RS256"]
    })
}

// =============================================================================
// Router
// =============================================================================

pub fn app_with(oidc: OidcClient) -> Router {
    let service = FooService::new(Arc::new(InMemoryFooStore::new()));
    build_router(
        &HttpServerConfig::default(),
        AppState::new(service, Arc::new(oidc)),
    )
}

/// Router over an empty in-memory store and the static provider
pub fn app() -> Router {
    app_with(oidc_client(STATIC_ISSUER))
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}
