//! Route-group guards.
//!
//! Each guarded group declares a [`GuardPolicy`]: the token type it accepts
//! and the login page a browser is sent to when the check fails. The guard
//! runs as a `route_layer`, so unknown paths still 404 instead of 401.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use hostelhub_auth::{TokenRejection, extract_token, validate_token};
use hostelhub_config::JwtConfig;
use hostelhub_models::{Claims, TokenType};

use crate::state::AppState;

/// Validated claims for the current request, set by a guard.
#[derive(Debug, Clone)]
pub struct Session(pub Claims);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardPolicy {
    pub expected: TokenType,
    pub login_path: &'static str,
}

impl GuardPolicy {
    pub const OWNER: Self = Self {
        expected: TokenType::Admin,
        login_path: "/login",
    };
    pub const STUDENT: Self = Self {
        expected: TokenType::Student,
        login_path: "/student/login",
    };
    pub const SUPER_ADMIN: Self = Self {
        expected: TokenType::SuperAdmin,
        login_path: "/super-admin/login",
    };

    /// Finds and validates a token of this policy's type.
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        jwt_config: &JwtConfig,
    ) -> Result<Claims, TokenRejection> {
        let token = extract_token(headers, Some(self.expected)).ok_or(TokenRejection::Missing)?;
        validate_token(&token, Some(self.expected), jwt_config)
    }

    /// 303 to the login page for browsers, 401 JSON otherwise.
    pub fn reject(&self, headers: &HeaderMap, rejection: TokenRejection) -> Response {
        if prefers_html(headers) {
            Redirect::to(self.login_path).into_response()
        } else {
            rejection.into_app_error().into_response()
        }
    }
}

/// True when the `Accept` header ranks `text/html` ahead of JSON.
pub fn prefers_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let html = accept.find("text/html");
    let json = accept.find("application/json");
    match (html, json) {
        (Some(h), Some(j)) => h < j,
        (Some(_), None) => true,
        _ => false,
    }
}

async fn guard(policy: GuardPolicy, state: &AppState, mut req: Request, next: Next) -> Response {
    match policy.authorize(req.headers(), &state.jwt_config) {
        Ok(claims) => {
            req.extensions_mut().insert(Session(claims));
            next.run(req).await
        }
        Err(rejection) => {
            debug!(
                policy = %policy.expected,
                reason = rejection.reason(),
                path = %req.uri().path(),
                "Guard rejected request"
            );
            crate::metrics::track_guard_rejection(policy.expected.as_str(), rejection.reason());
            policy.reject(req.headers(), rejection)
        }
    }
}

pub async fn require_owner(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(GuardPolicy::OWNER, &state, req, next).await
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(GuardPolicy::STUDENT, &state, req, next).await
}

pub async fn require_super_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(GuardPolicy::SUPER_ADMIN, &state, req, next).await
}
