//! Session and CSRF cookies.

use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};

use crate::api::web::state::CookieSettings;

pub const SESSION_COOKIE: &str = "staffdesk_session";
pub const CSRF_COOKIE: &str = "staffdesk_csrf";

/// Value of the named cookie from the request `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

fn base_cookie(name: &'static str, value: String, settings: CookieSettings) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build()
}

pub fn session_cookie(token: String, settings: CookieSettings) -> Cookie<'static> {
    base_cookie(SESSION_COOKIE, token, settings)
}

pub fn clear_session_cookie(settings: CookieSettings) -> Cookie<'static> {
    let mut c = base_cookie(SESSION_COOKIE, String::new(), settings);
    c.make_removal();
    c
}

/// CSRF token for a form page: the one already held by the client, or a
/// fresh one together with the cookie that carries it.
pub fn csrf_token(
    headers: &HeaderMap,
    settings: CookieSettings,
) -> (String, Option<Cookie<'static>>) {
    match cookie_value(headers, CSRF_COOKIE) {
        Some(token) => (token, None),
        None => {
            let token = nanoid::nanoid!(32);
            let cookie = base_cookie(CSRF_COOKIE, token.clone(), settings);
            (token, Some(cookie))
        }
    }
}

/// Double-submit check: the form field must equal the cookie.
pub fn csrf_matches(headers: &HeaderMap, submitted: &str, settings: CookieSettings) -> bool {
    if !settings.csrf_enabled {
        return true;
    }
    match cookie_value(headers, CSRF_COOKIE) {
        Some(expected) => !submitted.is_empty() && expected == submitted,
        None => false,
    }
}
