//! JWT claim structures for authentication tokens.
//!
//! Every token carries a [`TokenType`] discriminator. A token minted for one
//! kind of account is never accepted on a route group that expects another.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The kind of account a token was issued to.
///
/// Serialized as `admin`, `student` or `super_admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Hostel owner (tenant administrator)
    Admin,
    Student,
    SuperAdmin,
}

impl TokenType {
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenType::Admin => "admin",
            TokenType::Student => "student",
            TokenType::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims shared by all three token types.
///
/// - `phone` is set for owner and student tokens
/// - `username` is set for super-admin tokens
/// - `owner_id` is set for student tokens only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account id within its own table
    pub id: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub role: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Tenant of a student token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    /// The tenant whose rows this session may read.
    ///
    /// Student tokens carry their owner explicitly; an owner is its own
    /// tenant. Super-admin sessions have no tenant.
    pub fn tenant_id(&self) -> Option<i64> {
        match (self.owner_id, self.token_type) {
            (Some(owner_id), _) => Some(owner_id),
            (None, TokenType::Admin) => Some(self.id),
            (None, _) => None,
        }
    }
}
