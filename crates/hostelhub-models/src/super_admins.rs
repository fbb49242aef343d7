//! Super-admin models and DTOs.
//!
//! Super-admins operate across tenants and are never tenant scoped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::SuperAdminId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "super_admin_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SuperAdminStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, FromRow)]
pub struct SuperAdminRecord {
    pub id: SuperAdminId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub status: SuperAdminStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SuperAdmin {
    pub id: SuperAdminId,
    pub username: String,
    pub email: String,
    pub name: String,
    #[schema(example = "super_admin")]
    pub role: String,
    pub status: SuperAdminStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SuperAdminRecord> for SuperAdmin {
    fn from(record: SuperAdminRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            name: record.name,
            role: record.role,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Creates a super-admin, from the signup endpoint or the CLI.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SuperAdminSignupDto {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SuperAdminLoginDto {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuperAdminLoginResponse {
    pub token: String,
    pub super_admin: SuperAdmin,
}
