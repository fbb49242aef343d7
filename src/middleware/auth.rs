//! Session extractors.
//!
//! Behind a guard these reuse the [`Session`] it stored; on unguarded routes
//! they validate the token themselves with the same policy.

use axum::{extract::FromRequestParts, http::request::Parts};

use hostelhub_auth::{TokenRejection, validate_any_session};
use hostelhub_core::AppError;
use hostelhub_models::{Claims, OwnerId, StudentId, SuperAdminId, TokenType};

use crate::middleware::guard::{GuardPolicy, Session};
use crate::state::AppState;
use crate::utils::tenant::resolve_tenant;

fn session_claims(
    parts: &Parts,
    state: &AppState,
    policy: GuardPolicy,
) -> Result<Claims, AppError> {
    if let Some(Session(claims)) = parts.extensions.get::<Session>() {
        if claims.token_type == policy.expected {
            return Ok(claims.clone());
        }
    }

    policy
        .authorize(&parts.headers, &state.jwt_config)
        .map_err(TokenRejection::into_app_error)
}

/// An authenticated owner (`admin` token).
#[derive(Debug, Clone)]
pub struct AuthOwner(pub Claims);

impl AuthOwner {
    pub fn owner_id(&self) -> OwnerId {
        OwnerId::new(self.0.id)
    }
}

impl FromRequestParts<AppState> for AuthOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_claims(parts, state, GuardPolicy::OWNER).map(AuthOwner)
    }
}

/// An authenticated student, bound to its owner's tenant.
#[derive(Debug, Clone)]
pub struct AuthStudent(pub Claims);

impl AuthStudent {
    pub fn student_id(&self) -> StudentId {
        StudentId::new(self.0.id)
    }

    pub fn owner_id(&self) -> Result<OwnerId, AppError> {
        resolve_tenant(&self.0)
    }
}

impl FromRequestParts<AppState> for AuthStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_claims(parts, state, GuardPolicy::STUDENT).map(AuthStudent)
    }
}

#[derive(Debug, Clone)]
pub struct AuthSuperAdmin(pub Claims);

impl AuthSuperAdmin {
    pub fn super_admin_id(&self) -> SuperAdminId {
        SuperAdminId::new(self.0.id)
    }
}

impl FromRequestParts<AppState> for AuthSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_claims(parts, state, GuardPolicy::SUPER_ADMIN).map(AuthSuperAdmin)
    }
}

/// Any valid session, in either transport, of any token type. A stale
/// cookie of one type does not hide a valid cookie of another.
#[derive(Debug, Clone)]
pub struct AnySession(pub Claims);

impl AnySession {
    pub fn token_type(&self) -> TokenType {
        self.0.token_type
    }
}

impl FromRequestParts<AppState> for AnySession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(Session(claims)) = parts.extensions.get::<Session>() {
            return Ok(AnySession(claims.clone()));
        }

        validate_any_session(&parts.headers, &state.jwt_config)
            .map(AnySession)
            .map_err(TokenRejection::into_app_error)
    }
}
