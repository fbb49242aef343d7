//! Auth cookie construction.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use hostelhub_auth::{AUTH_COOKIES, cookie_name};
use hostelhub_config::JwtConfig;
use hostelhub_models::TokenType;

fn ttl_for(token_type: TokenType, jwt_config: &JwtConfig) -> i64 {
    match token_type {
        TokenType::Admin => jwt_config.owner_token_ttl,
        TokenType::Student => jwt_config.student_token_ttl,
        TokenType::SuperAdmin => jwt_config.super_admin_token_ttl,
    }
}

/// HTTP-only session cookie for `token`, named for its type and living as
/// long as the token.
pub fn auth_cookie(token_type: TokenType, token: String, jwt_config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((cookie_name(token_type), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(jwt_config.secure_cookies)
        .max_age(time::Duration::seconds(ttl_for(token_type, jwt_config)))
        .build()
}

/// Expires every auth cookie, whether or not the request carried it.
pub fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    AUTH_COOKIES.iter().fold(jar, |jar, name| {
        jar.add(
            Cookie::build((*name, ""))
                .path("/")
                .http_only(true)
                .max_age(time::Duration::ZERO)
                .build(),
        )
    })
}
