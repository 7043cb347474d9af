//! # ID Token Verification
//!
//! Checks provider-issued ID tokens against the provider's published keys.
//!
//! ## Invariants
//! - Only asymmetric algorithms are accepted
//! - Signature, issuer, audience and expiry must all pass
//! - No network access; the key set is fetched once at startup

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use super::claims::Claims;
use super::errors::{AuthError, AuthResult};

/// Allowed clock skew for `exp` and `nbf`
pub const DEFAULT_LEEWAY_SECS: u64 = 60;

/// Issuer Google places in some ID tokens in place of its discovery issuer
const GOOGLE_ISSUER: &str = "https://accounts.google.com";
const GOOGLE_BARE_ISSUER: &str = "accounts.google.com";

/// A token that passed every verification check
#[derive(Debug, Clone)]
pub struct VerifiedAssertion {
    payload: Value,
}

impl VerifiedAssertion {
    /// Extract the display claims
    pub fn claims(&self) -> AuthResult<Claims> {
        Claims::from_payload(&self.payload)
    }

    /// Subject identifier, when present
    pub fn subject(&self) -> Option<&str> {
        self.payload.get("sub").and_then(Value::as_str)
    }
}

/// Verifier bound to one provider and one client
#[derive(Debug, Clone)]
pub struct IdTokenVerifier {
    audience: String,
    issuers: Vec<String>,
    keys: JwkSet,
}

impl IdTokenVerifier {
    /// Create a verifier for tokens from `issuer` addressed to `client_id`
    pub fn new(issuer: &str, client_id: &str, keys: JwkSet) -> Self {
        Self {
            audience: client_id.to_string(),
            issuers: accepted_issuers(issuer),
            keys,
        }
    }

    /// Issuer values a token may carry
    pub fn accepted_issuers(&self) -> &[String] {
        &self.issuers
    }

    /// Number of signing keys known to this verifier
    pub fn key_count(&self) -> usize {
        self.keys.keys.len()
    }

    /// Verify a raw compact-serialized token
    pub fn verify(&self, raw: &str) -> AuthResult<VerifiedAssertion> {
        let header = decode_header(raw)
            .map_err(|e| AuthError::Verification(format!("malformed token: {e}")))?;

        if !is_asymmetric(header.alg) {
            return Err(AuthError::Verification(format!(
                "unsupported signing algorithm {:?}",
                header.alg
            )));
        }

        // Without a kid every published key is a candidate
        let candidates: Vec<&Jwk> = match header.kid.as_deref() {
            Some(kid) => self.keys.find(kid).into_iter().collect(),
            None => self.keys.keys.iter().collect(),
        };

        if candidates.is_empty() {
            return Err(AuthError::Verification(
                "no signing key matches the token".to_string(),
            ));
        }

        let validation = self.validation(header.alg);
        let mut last_error = None;

        for jwk in candidates {
            let key = match DecodingKey::from_jwk(jwk) {
                Ok(key) => key,
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            };

            match decode::<Value>(raw, &key, &validation) {
                Ok(data) => {
                    return Ok(VerifiedAssertion {
                        payload: data.claims,
                    })
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(verification_error(last_error))
    }

    fn validation(&self, alg: Algorithm) -> Validation {
        let mut validation = Validation::new(alg);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(self.issuers.as_slice());
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = DEFAULT_LEEWAY_SECS;
        validation
    }
}

fn accepted_issuers(issuer: &str) -> Vec<String> {
    let mut issuers = vec![issuer.to_string()];
    if issuer.trim_end_matches('/') == GOOGLE_ISSUER {
        issuers.push(GOOGLE_BARE_ISSUER.to_string());
    }
    issuers
}

fn is_asymmetric(alg: Algorithm) -> bool {
    !matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

fn verification_error(error: Option<JwtError>) -> AuthError {
    let reason = match error.as_ref().map(JwtError::kind) {
        Some(ErrorKind::ExpiredSignature) => "token expired".to_string(),
        Some(ErrorKind::ImmatureSignature) => "token not yet valid".to_string(),
        Some(ErrorKind::InvalidSignature) => "invalid signature".to_string(),
        Some(ErrorKind::InvalidAudience) => "audience mismatch".to_string(),
        Some(ErrorKind::InvalidIssuer) => "issuer mismatch".to_string(),
        Some(ErrorKind::MissingRequiredClaim(claim)) => format!("missing claim {claim}"),
        Some(_) => error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        None => "no usable signing key".to_string(),
    };
    AuthError::Verification(reason)
}
