//! Token issuance and validation.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret. Validation
//! runs in a fixed order and stops at the first failure:
//!
//! 1. Signature and structure ([`TokenRejection::InvalidSignature`], [`TokenRejection::Malformed`])
//! 2. Expiry, with `jsonwebtoken`'s default 60 second leeway ([`TokenRejection::Expired`])
//! 3. Token type against the route group's expectation ([`TokenRejection::WrongType`])
//!
//! # Example
//!
//! ```ignore
//! use hostelhub_auth::{TokenType, issue_owner_token, validate_token};
//! use hostelhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_owner_token(owner_id, "Rahim", "01711111111", &config)?;
//!
//! let claims = validate_token(&token, Some(TokenType::Admin), &config)?;
//! assert_eq!(claims.tenant_id(), Some(owner_id));
//! ```

use std::fmt;

use axum::http::HeaderMap;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use utoipa::ToSchema;

use hostelhub_config::JwtConfig;
use hostelhub_core::AppError;

use crate::claims::{Claims, TokenType};
use crate::transport::{bearer_token, session_cookies};

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// No token in either transport
    Missing,
    Malformed,
    InvalidSignature,
    Expired,
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },
}

impl TokenRejection {
    /// Stable machine-readable reason, used in 401 bodies and metrics labels.
    pub const fn reason(&self) -> &'static str {
        match self {
            TokenRejection::Missing => "missing",
            TokenRejection::Malformed => "malformed",
            TokenRejection::InvalidSignature => "invalid_signature",
            TokenRejection::Expired => "expired",
            TokenRejection::WrongType { .. } => "wrong_type",
        }
    }

    pub fn message(&self) -> String {
        match self {
            TokenRejection::Missing => "Authentication required".to_string(),
            TokenRejection::Malformed => "Malformed token".to_string(),
            TokenRejection::InvalidSignature => "Invalid token signature".to_string(),
            TokenRejection::Expired => "Token expired".to_string(),
            TokenRejection::WrongType { expected, actual } => {
                format!("Expected a {} token, got a {} token", expected, actual)
            }
        }
    }

    pub fn into_app_error(self) -> AppError {
        AppError::unauthorized(self.message()).with_detail("reason", self.reason())
    }
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Serializable outcome of a validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TokenValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&Result<Claims, TokenRejection>> for TokenValidation {
    fn from(result: &Result<Claims, TokenRejection>) -> Self {
        match result {
            Ok(_) => TokenValidation {
                valid: true,
                reason: None,
            },
            Err(rejection) => TokenValidation {
                valid: false,
                reason: Some(rejection.reason().to_string()),
            },
        }
    }
}

/// Issues an owner (`admin`) token.
pub fn issue_owner_token(
    id: i64,
    name: &str,
    phone: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let claims = build_claims(
        id,
        TokenType::Admin,
        name,
        Some(phone),
        None,
        None,
        jwt_config.owner_token_ttl,
    );
    sign_claims(&claims, jwt_config)
}

/// Issues a student token bound to its owner's tenant.
pub fn issue_student_token(
    id: i64,
    owner_id: i64,
    name: &str,
    phone: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let claims = build_claims(
        id,
        TokenType::Student,
        name,
        Some(phone),
        None,
        Some(owner_id),
        jwt_config.student_token_ttl,
    );
    sign_claims(&claims, jwt_config)
}

pub fn issue_super_admin_token(
    id: i64,
    name: &str,
    username: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let claims = build_claims(
        id,
        TokenType::SuperAdmin,
        name,
        None,
        Some(username),
        None,
        jwt_config.super_admin_token_ttl,
    );
    sign_claims(&claims, jwt_config)
}

/// Signs arbitrary claims. Issuers above are the normal entry points.
pub fn sign_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Validates a token and, when `expected` is set, its type.
pub fn validate_token(
    token: &str,
    expected: Option<TokenType>,
    jwt_config: &JwtConfig,
) -> Result<Claims, TokenRejection> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenRejection::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        _ => TokenRejection::Malformed,
    })?;

    if let Some(expected) = expected {
        if claims.token_type != expected {
            return Err(TokenRejection::WrongType {
                expected,
                actual: claims.token_type,
            });
        }
    }

    Ok(claims)
}

/// Validates any session a request carries.
///
/// A bearer token is validated as-is. Otherwise each auth cookie is checked
/// against the type its name implies, and the first one that validates wins,
/// so a stale cookie never hides a valid one. When none validates, the
/// first rejection is returned.
pub fn validate_any_session(
    headers: &HeaderMap,
    jwt_config: &JwtConfig,
) -> Result<Claims, TokenRejection> {
    if let Some(token) = bearer_token(headers) {
        return validate_token(&token, None, jwt_config);
    }

    let mut first_rejection = None;
    for (token_type, token) in session_cookies(headers) {
        match validate_token(&token, Some(token_type), jwt_config) {
            Ok(claims) => return Ok(claims),
            Err(rejection) => {
                first_rejection.get_or_insert(rejection);
            }
        }
    }

    Err(first_rejection.unwrap_or(TokenRejection::Missing))
}

fn build_claims(
    id: i64,
    token_type: TokenType,
    name: &str,
    phone: Option<&str>,
    username: Option<&str>,
    owner_id: Option<i64>,
    ttl_seconds: i64,
) -> Claims {
    let now = Utc::now().timestamp() as usize;
    Claims {
        id,
        token_type,
        role: token_type.as_str().to_string(),
        name: name.to_string(),
        phone: phone.map(str::to_string),
        username: username.map(str::to_string),
        owner_id,
        iat: now,
        exp: now + ttl_seconds.max(0) as usize,
    }
}
