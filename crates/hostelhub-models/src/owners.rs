//! Owner (hostel administrator) models and DTOs.
//!
//! An owner is the tenant: every student, category, rent and payment row
//! carries its `owner_id`. Owners sign up with a phone number, stay
//! `pending` until the phone is verified by OTP, and only then may log in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use hostelhub_core::serde::{deserialize_optional_enum, deserialize_optional_string};
use hostelhub_core::{PaginationMeta, PaginationParams};

use crate::ids::OwnerId;
use crate::validation::{validate_phone, validate_subdomain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "owner_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OwnerStatus {
    /// Signed up, phone not yet verified
    Pending,
    Active,
}

/// Full owner row, including credentials and OTP state.
///
/// Never serialized; convert to [`Owner`] for responses.
#[derive(Debug, Clone, FromRow)]
pub struct OwnerRecord {
    pub id: OwnerId,
    pub phone: String,
    pub password_hash: String,
    pub name: String,
    pub status: OwnerStatus,
    pub otp: Option<String>,
    pub otp_expire: Option<DateTime<Utc>>,
    /// Wrong codes submitted against the current OTP
    pub otp_attempts: i32,
    pub subdomain: Option<String>,
    pub sms_activation: bool,
    pub sms_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Owner {
    pub id: OwnerId,
    #[schema(example = "01711111111")]
    pub phone: String,
    pub name: String,
    pub status: OwnerStatus,
    pub subdomain: Option<String>,
    /// Whether outbound SMS to students is enabled for this tenant
    pub sms_activation: bool,
    /// Remaining SMS credit
    pub sms_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OwnerRecord> for Owner {
    fn from(record: OwnerRecord) -> Self {
        Self {
            id: record.id,
            phone: record.phone,
            name: record.name,
            status: record.status,
            subdomain: record.subdomain,
            sms_activation: record.sms_activation,
            sms_amount: record.sms_amount,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Owner row with its student count, as listed to super-admins.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OwnerWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub owner: Owner,
    pub student_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OwnerSignupDto {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "01711111111")]
    pub phone: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(custom(function = "validate_subdomain"))]
    pub subdomain: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerSignupResponse {
    pub message: String,
    pub owner: Owner,
    /// When the issued OTP stops being accepted
    pub otp_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpDto {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(equal = 6, message = "otp must be 6 digits"))]
    #[schema(example = "123456")]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResendOtpDto {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OwnerLoginDto {
    #[validate(length(min = 1, message = "phone is required"))]
    #[schema(example = "01711111111")]
    pub phone: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerLoginResponse {
    pub token: String,
    pub owner: Owner,
}

/// Super-admin edit of an owner. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOwnerDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    pub status: Option<OwnerStatus>,
    #[validate(custom(function = "validate_subdomain"))]
    pub subdomain: Option<String>,
    pub sms_activation: Option<bool>,
    #[validate(range(min = 0, message = "sms_amount cannot be negative"))]
    pub sms_amount: Option<i64>,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerFilterParams {
    /// Substring match over name, phone and subdomain
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_enum")]
    pub status: Option<OwnerStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedOwnersResponse {
    pub data: Vec<OwnerWithStats>,
    pub meta: PaginationMeta,
}

/// Rows that still reference an owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct OwnerDependents {
    pub students: i64,
    pub categories: i64,
    pub rents: i64,
    pub payments: i64,
}

impl OwnerDependents {
    pub fn is_empty(&self) -> bool {
        self.students == 0 && self.categories == 0 && self.rents == 0 && self.payments == 0
    }
}
