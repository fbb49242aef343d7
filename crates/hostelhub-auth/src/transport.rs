//! Token transports.
//!
//! A token may arrive as `Authorization: Bearer <token>` or in an HTTP-only
//! cookie named for its type. The header always wins.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;

use crate::claims::TokenType;

pub const OWNER_COOKIE: &str = "auth_token";
pub const STUDENT_COOKIE: &str = "student_token";
pub const SUPER_ADMIN_COOKIE: &str = "super_admin_token";

/// Every auth cookie, in the order an untyped lookup tries them.
pub const AUTH_COOKIES: [&str; 3] = [OWNER_COOKIE, STUDENT_COOKIE, SUPER_ADMIN_COOKIE];

pub const fn cookie_name(token_type: TokenType) -> &'static str {
    match token_type {
        TokenType::Admin => OWNER_COOKIE,
        TokenType::Student => STUDENT_COOKIE,
        TokenType::SuperAdmin => SUPER_ADMIN_COOKIE,
    }
}

const COOKIE_TYPES: [TokenType; 3] = [TokenType::Admin, TokenType::Student, TokenType::SuperAdmin];

/// Returns the first token found for the expected type, if any.
///
/// With no expected type every auth cookie is tried in [`AUTH_COOKIES`] order.
pub fn extract_token(headers: &HeaderMap, expected: Option<TokenType>) -> Option<String> {
    if let Some(token) = bearer_token(headers) {
        return Some(token);
    }

    let jar = CookieJar::from_headers(headers);
    match expected {
        Some(token_type) => cookie_value(&jar, cookie_name(token_type)),
        None => AUTH_COOKIES.iter().find_map(|name| cookie_value(&jar, name)),
    }
}

/// Every non-empty auth cookie with the token type its name implies, in
/// [`AUTH_COOKIES`] order.
pub fn session_cookies(headers: &HeaderMap) -> Vec<(TokenType, String)> {
    let jar = CookieJar::from_headers(headers);
    COOKIE_TYPES
        .into_iter()
        .filter_map(|token_type| {
            cookie_value(&jar, cookie_name(token_type)).map(|value| (token_type, value))
        })
        .collect()
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
