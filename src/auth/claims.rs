//! Display claims extracted from a verified ID token.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{AuthError, AuthResult};

/// Verified identity attributes for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,
}

impl Claims {
    /// Decode claims from a verified token payload.
    ///
    /// Absent claims become empty strings; a claim of the wrong type fails.
    pub fn from_payload(payload: &Value) -> AuthResult<Self> {
        Claims::deserialize(payload).map_err(AuthError::Claims)
    }
}
