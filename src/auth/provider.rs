//! # OIDC Provider Client
//!
//! Discovery, authorization URL construction and the authorization-code
//! exchange against a single OpenID Connect provider.
//!
//! ## Invariants
//! - Discovery and key fetch happen once, before the server accepts traffic
//! - The discovered issuer must match the configured provider URL

use std::time::Duration;

use jsonwebtoken::jwk::JwkSet;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use url::Url;

use super::claims::Claims;
use super::errors::{AuthError, AuthResult};
use super::verifier::{IdTokenVerifier, VerifiedAssertion};
use crate::config::OidcConfig;

/// Path of the discovery document below the provider URL
pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Timeout for every outbound provider call
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body copied into the logs
const MAX_LOGGED_BODY: usize = 512;

// ==================
// Wire Types
// ==================

/// Fields of the discovery document this client relies on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub jwks_uri: String,
}

/// Token endpoint response; only the ID token is used
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Outcome of a completed login
#[derive(Debug, Clone)]
pub struct Login {
    /// Display claims of the authenticated user
    pub claims: Claims,

    /// Raw ID token as issued by the provider
    pub assertion: String,
}

// ==================
// Client
// ==================

/// Client for one provider and one registered application
#[derive(Debug, Clone)]
pub struct OidcClient {
    config: OidcConfig,
    metadata: ProviderMetadata,
    authorization_endpoint: Url,
    verifier: IdTokenVerifier,
    http: reqwest::Client,
}

impl OidcClient {
    /// Discover the provider and fetch its signing keys
    pub async fn discover(config: OidcConfig) -> AuthResult<Self> {
        let http = build_http_client()?;

        let metadata = fetch_metadata(&http, &config.provider_url).await?;
        if !same_issuer(&metadata.issuer, &config.provider_url) {
            return Err(AuthError::Discovery(format!(
                "issuer {} does not match provider url {}",
                metadata.issuer, config.provider_url
            )));
        }

        let keys = fetch_keys(&http, &metadata.jwks_uri).await?;

        tracing::info!(
            issuer = %metadata.issuer,
            keys = keys.keys.len(),
            "OIDC provider discovered"
        );

        Self::assemble(config, metadata, keys, http)
    }

    /// Build a client from already-known metadata and keys
    pub fn new(config: OidcConfig, metadata: ProviderMetadata, keys: JwkSet) -> AuthResult<Self> {
        let http = build_http_client()?;
        Self::assemble(config, metadata, keys, http)
    }

    fn assemble(
        config: OidcConfig,
        metadata: ProviderMetadata,
        keys: JwkSet,
        http: reqwest::Client,
    ) -> AuthResult<Self> {
        let authorization_endpoint = Url::parse(&metadata.authorization_endpoint).map_err(|e| {
            AuthError::Discovery(format!(
                "invalid authorization endpoint {}: {e}",
                metadata.authorization_endpoint
            ))
        })?;

        let verifier = IdTokenVerifier::new(&metadata.issuer, &config.client_id, keys);

        Ok(Self {
            config,
            metadata,
            authorization_endpoint,
            verifier,
            http,
        })
    }

    /// Discovered provider metadata
    pub fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    /// Verifier for tokens issued to this client
    pub fn verifier(&self) -> &IdTokenVerifier {
        &self.verifier
    }

    /// Whether login cookies must carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.config.secure_cookies()
    }

    /// Provider URL the user agent is sent to, carrying `state`
    pub fn authorization_url(&self, state: &str) -> String {
        let mut url = self.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", state);
        url.to_string()
    }

    /// Exchange an authorization code for the raw ID token
    pub async fn exchange_code(&self, code: &str) -> AuthResult<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.metadata.token_endpoint)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(error = %e, "Failed to read token endpoint error body");
                    String::new()
                }
            };
            tracing::warn!(
                status = %status,
                body = %truncate(&body, MAX_LOGGED_BODY),
                "Token endpoint rejected the code"
            );
            return Err(AuthError::Exchange(format!(
                "token endpoint returned {status}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        token
            .id_token
            .filter(|raw| !raw.is_empty())
            .ok_or(AuthError::MissingAssertion)
    }

    /// Verify a raw ID token issued to this client
    pub fn verify(&self, raw: &str) -> AuthResult<VerifiedAssertion> {
        self.verifier.verify(raw)
    }

    /// Exchange, verify and extract claims for a returned code
    pub async fn complete_login(&self, code: &str) -> AuthResult<Login> {
        let assertion = self.exchange_code(code).await?;
        let claims = self.verify(&assertion)?.claims()?;
        Ok(Login { claims, assertion })
    }
}

// ==================
// Helpers
// ==================

fn build_http_client() -> AuthResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .build()
        .map_err(AuthError::HttpClient)
}

async fn fetch_metadata(http: &reqwest::Client, provider_url: &str) -> AuthResult<ProviderMetadata> {
    let url = format!("{}{}", provider_url.trim_end_matches('/'), DISCOVERY_PATH);
    tracing::debug!(url = %url, "Fetching discovery document");

    http.get(&url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| AuthError::Discovery(format!("fetching {url}: {e}")))?
        .json::<ProviderMetadata>()
        .await
        .map_err(|e| AuthError::Discovery(format!("parsing {url}: {e}")))
}

async fn fetch_keys(http: &reqwest::Client, jwks_uri: &str) -> AuthResult<JwkSet> {
    tracing::debug!(url = %jwks_uri, "Fetching signing keys");

    let keys = http
        .get(jwks_uri)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| AuthError::Discovery(format!("fetching {jwks_uri}: {e}")))?
        .json::<JwkSet>()
        .await
        .map_err(|e| AuthError::Discovery(format!("parsing {jwks_uri}: {e}")))?;

    if keys.keys.is_empty() {
        return Err(AuthError::Discovery(format!(
            "{jwks_uri} published no signing keys"
        )));
    }
    Ok(keys)
}

fn same_issuer(discovered: &str, configured: &str) -> bool {
    discovered.trim_end_matches('/') == configured.trim_end_matches('/')
}

fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
