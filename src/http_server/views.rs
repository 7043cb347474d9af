//! HTML pages for the login flow.

use crate::auth::Claims;

/// What the home page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeView<'a> {
    /// Not logged in
    Anonymous,
    /// A login step failed; nothing about the failure is shown
    Failed,
    /// Login completed for these claims
    LoggedIn(&'a Claims),
}

/// Render the home page
pub fn render_home(view: HomeView<'_>) -> String {
    let body = match view {
        HomeView::Anonymous => String::from(
            r#"<p>You are not logged in.</p>
    <a href="/login">Login with Google</a>"#,
        ),
        HomeView::Failed => String::from(
            r#"<p class="error">Something went wrong while logging in. Please try again.</p>
    <a href="/login">Login with Google</a>"#,
        ),
        HomeView::LoggedIn(claims) => format!(
            r#"<p>Welcome, {name}!</p>
    <p>Email: {email}</p>"#,
            name = html_escape(&claims.name),
            email = html_escape(&claims.email),
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Home</title>
</head>
<body>
    <h1>Home</h1>
    {body}
</body>
</html>"#
    )
}

/// Escape text for an HTML element or attribute
fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
