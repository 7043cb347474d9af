//! # Auth Module
//!
//! OpenID Connect login against an external provider and verification of
//! the ID tokens it issues.

pub mod claims;
pub mod cookies;
pub mod errors;
pub mod provider;
pub mod state;
pub mod verifier;

pub use claims::Claims;
pub use errors::{AuthError, AuthResult};
pub use provider::{Login, OidcClient, ProviderMetadata};
pub use state::{generate_state, states_match};
pub use verifier::{IdTokenVerifier, VerifiedAssertion};
