//! Access Guard Tests
//!
//! Every `/foos` route requires a verified bearer assertion. The guard must
//! reject before any handler or store work happens.

mod common;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use tower::ServiceExt;

use common::{
    app, body_json, empty_request, id_token_payload, now, sign_token, valid_token, PROVIDER_KEY,
    ROGUE_KEY, STATIC_ISSUER,
};

async fn status_and_message(request: Request<Body>) -> (StatusCode, String) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = body_json(response).await;
    (status, body["message"].as_str().unwrap_or_default().to_string())
}

fn with_authorization(value: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/foos")
        .header(header::AUTHORIZATION, value)
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// Malformed Credentials (400)
// =============================================================================

#[tokio::test]
async fn missing_authorization_header_is_bad_request() {
    let (status, message) = status_and_message(empty_request("GET", "/foos", None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.contains("3R7WBW"));
}

#[tokio::test]
async fn non_bearer_schemes_are_bad_request() {
    for value in ["Basic dXNlcjpwYXNz", "bearer abc", "Bearer ", "abc.def.ghi"] {
        let (status, _) = status_and_message(with_authorization(value)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "header {value:?}");
    }
}

#[tokio::test]
async fn every_foo_route_is_guarded() {
    let requests = [
        empty_request("GET", "/foos", None),
        empty_request("DELETE", "/foos", None),
        common::json_request("POST", "/foos", None, json!({"name": "Ada"})),
        common::json_request("PUT", "/foos/1", None, json!({"name": "Ada"})),
    ];

    for request in requests {
        let (status, _) = status_and_message(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Failed Verification (401)
// =============================================================================

#[tokio::test]
async fn garbage_bearer_is_unauthorized() {
    let (status, message) = status_and_message(with_authorization("Bearer not-a-jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message, "Error S2UU5K - Invalid or expired token.");
}

#[tokio::test]
async fn token_signed_by_unknown_key_is_unauthorized() {
    let token = sign_token(ROGUE_KEY, &id_token_payload(STATIC_ISSUER));
    let (status, _) = status_and_message(empty_request("GET", "/foos", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let mut payload = id_token_payload(STATIC_ISSUER);
    payload["exp"] = json!(now() - 3600);
    let token = sign_token(PROVIDER_KEY, &payload);

    let (status, _) = status_and_message(empty_request("GET", "/foos", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_another_client_is_unauthorized() {
    let mut payload = id_token_payload(STATIC_ISSUER);
    payload["aud"] = json!("some-other-client");
    let token = sign_token(PROVIDER_KEY, &payload);

    let (status, _) = status_and_message(empty_request("GET", "/foos", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_another_issuer_is_unauthorized() {
    let token = sign_token(PROVIDER_KEY, &id_token_payload("https://evil.test"));
    let (status, _) = status_and_message(empty_request("GET", "/foos", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn hmac_token_is_unauthorized() {
    let token = encode(
        &Header::new(Algorithm::HS256),
        &id_token_payload(STATIC_ISSUER),
        &EncodingKey::from_secret(b"guessable"),
    )
    .unwrap();

    let (status, _) = status_and_message(empty_request("GET", "/foos", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Claims
// =============================================================================

#[tokio::test]
async fn malformed_claims_are_server_error() {
    let mut payload = id_token_payload(STATIC_ISSUER);
    payload["email"] = json!(["ada@example.com"]);
    let token = sign_token(PROVIDER_KEY, &payload);

    let (status, message) = status_and_message(empty_request("GET", "/foos", Some(&token))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(message.contains("KH1NV5"));
}

#[tokio::test]
async fn token_without_display_claims_is_accepted() {
    let mut payload = id_token_payload(STATIC_ISSUER);
    let claims = payload.as_object_mut().unwrap();
    claims.remove("name");
    claims.remove("email");
    let token = sign_token(PROVIDER_KEY, &payload);

    let response = app()
        .oneshot(empty_request("GET", "/foos", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn valid_token_reaches_the_handler() {
    let response = app()
        .oneshot(empty_request("GET", "/foos", Some(&valid_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}
