//! Auth HTTP Routes
//!
//! Browser-facing login flow: home page, redirect to the provider and the
//! provider callback. Failures render the home page in its error state and
//! are only detailed in the logs.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{AppendHeaders, Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::errors::error_chain;
use super::server::AppState;
use super::views::{render_home, HomeView};
use crate::auth::cookies::{self, STATE_COOKIE};
use crate::auth::{generate_state, states_match};

/// Auth routes; never guarded
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
}

/// Query parameters the provider sends back
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
}

// ==================
// Handlers
// ==================

async fn home_handler() -> Html<String> {
    Html(render_home(HomeView::Anonymous))
}

/// Start a login: set the state cookie and redirect to the provider
async fn login_handler(State(state): State<AppState>) -> Response {
    let login_state = match generate_state() {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %error_chain(&e), "Error: NKUM7E - Logging in.");
            return Html(render_home(HomeView::Failed)).into_response();
        }
    };

    let location = state.oidc.authorization_url(&login_state);
    let cookie = cookies::state_cookie(&login_state, state.oidc.secure_cookies());

    (
        StatusCode::FOUND,
        [(LOCATION, location), (SET_COOKIE, cookie)],
    )
        .into_response()
}

/// Finish a login: check state, exchange the code and verify the token
async fn callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<CallbackParams>, QueryRejection>,
) -> Response {
    let secure = state.oidc.secure_cookies();
    let clear_state = cookies::clear_state_cookie(secure);

    let params = match query {
        Ok(Query(params)) => params,
        Err(e) => {
            tracing::error!(
                error = %e,
                "Error: 92ASWW - Logging in. Callback query string is malformed."
            );
            return failed(clear_state);
        }
    };

    let issued = cookies::read_cookie(&headers, STATE_COOKIE);
    if !states_match(issued, params.state.as_deref()) {
        tracing::error!(
            cookie_present = issued.is_some(),
            "Error: 92ASWW - Logging in. CSRF attempted. States do not match."
        );
        return failed(clear_state);
    }

    let code = match params.code.as_deref().filter(|code| !code.is_empty()) {
        Some(code) => code,
        None => {
            tracing::error!(
                provider_error = ?params.error,
                "Error: TDUSAL - Getting oidc code from query string."
            );
            return failed(clear_state);
        }
    };

    match state.oidc.complete_login(code).await {
        Ok(login) => {
            tracing::info!(email = %login.claims.email, "Login completed");
            let assertion = cookies::assertion_cookie(&login.assertion, secure);
            (
                AppendHeaders([(SET_COOKIE, clear_state), (SET_COOKIE, assertion)]),
                Html(render_home(HomeView::LoggedIn(&login.claims))),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %error_chain(&e), "Error: 0GLO1T - Processing OAuth.");
            failed(clear_state)
        }
    }
}

fn failed(clear_state: String) -> Response {
    (
        AppendHeaders([(SET_COOKIE, clear_state)]),
        Html(render_home(HomeView::Failed)),
    )
        .into_response()
}
