//! Cookies used by the login flow.
//!
//! Both cookies are `HttpOnly` and `SameSite=Lax` so the provider redirect
//! back to `/callback` still carries them.

use axum::http::{header::COOKIE, HeaderMap};

/// Cookie holding the anti-forgery state during the provider round trip
pub const STATE_COOKIE: &str = "oidc_state";

/// Cookie holding the raw ID token after a successful login
pub const ASSERTION_COOKIE: &str = "jwt_token";

/// State cookie lifetime in seconds (5 minutes)
pub const STATE_COOKIE_MAX_AGE: i64 = 5 * 60;

/// Assertion cookie lifetime in seconds (1 year)
pub const ASSERTION_COOKIE_MAX_AGE: i64 = 365 * 24 * 60 * 60;

fn build_cookie(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{name}={value}; Max-Age={max_age}; Path=/; HttpOnly; SameSite=Lax{secure_flag}")
}

/// `Set-Cookie` value carrying the anti-forgery state
pub fn state_cookie(state: &str, secure: bool) -> String {
    build_cookie(STATE_COOKIE, state, STATE_COOKIE_MAX_AGE, secure)
}

/// `Set-Cookie` value expiring the anti-forgery state
pub fn clear_state_cookie(secure: bool) -> String {
    build_cookie(STATE_COOKIE, "", 0, secure)
}

/// `Set-Cookie` value carrying the raw assertion
pub fn assertion_cookie(assertion: &str, secure: bool) -> String {
    build_cookie(ASSERTION_COOKIE, assertion, ASSERTION_COOKIE_MAX_AGE, secure)
}

/// Find a cookie value in the request headers.
///
/// All `Cookie` headers are searched; HTTP/2 clients may send several.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}
