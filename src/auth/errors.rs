//! # Auth Errors
//!
//! Error types for the identity flow and the access guard.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Identity flow errors
#[derive(Debug, Error)]
pub enum AuthError {
    // ==================
    // Provider Errors
    // ==================

    /// Discovery document or signing keys could not be fetched
    #[error("Fatal: 3JEUER - Getting oidc provider: {0}")]
    Discovery(String),

    /// Outbound HTTP client could not be built
    #[error("Fatal: 3JEUER - Building the provider http client.")]
    HttpClient(#[source] reqwest::Error),

    // ==================
    // Login Errors
    // ==================

    /// The OS random source failed
    #[error("Error: Z34I1P - Generating state for oidc.")]
    StateGeneration(#[source] rand::Error),

    /// The token endpoint call failed or returned an error
    #[error("Error: FN1SF9 - Exchanging the code for a token: {0}")]
    Exchange(String),

    /// Token response carried no ID token
    #[error("Error: ZODLPM - Extracting the jwt.")]
    MissingAssertion,

    // ==================
    // Assertion Errors
    // ==================

    /// Signature, issuer, audience or expiry check failed
    #[error("Error: FX6ZJP - Verifying the jwt: {0}")]
    Verification(String),

    /// Verified payload does not hold usable display claims
    #[error("Error: WTWOO1 - Extracting the claims.")]
    Claims(#[source] serde_json::Error),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Verification(_) => 401,

            AuthError::Discovery(_)
            | AuthError::HttpClient(_)
            | AuthError::StateGeneration(_)
            | AuthError::Exchange(_)
            | AuthError::MissingAssertion
            | AuthError::Claims(_) => 500,
        }
    }

    /// Returns whether this error was caused by the caller
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
