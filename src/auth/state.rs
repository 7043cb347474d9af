//! # Anti-Forgery State
//!
//! Random values correlating an authorization request with its callback.
//!
//! ## Invariants
//! - 256 bits from the OS random source, URL-safe base64
//! - Comparison is constant time and a missing cookie never matches

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};

/// Number of random bytes in a state value
pub const STATE_BYTES: usize = 32;

/// Generate a fresh state value
pub fn generate_state() -> AuthResult<String> {
    let mut bytes = [0u8; STATE_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(AuthError::StateGeneration)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Compare the state issued at login with the one returned on callback.
///
/// An absent or empty issued value is treated as a forgery, even when the
/// returned value is also empty.
pub fn states_match(issued: Option<&str>, returned: Option<&str>) -> bool {
    match (issued, returned) {
        (Some(issued), Some(returned)) if !issued.is_empty() => {
            issued.as_bytes().ct_eq(returned.as_bytes()).into()
        }
        _ => false,
    }
}
