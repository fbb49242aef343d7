//! Student domain models and DTOs.
//!
//! Students belong to exactly one owner. Their stored secret may be a bcrypt
//! hash or, for rows created before hashing, plaintext; see
//! `hostelhub_core::password::verify_student_secret`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use hostelhub_core::serde::{
    deserialize_optional_enum, deserialize_optional_i64, deserialize_optional_string,
};
use hostelhub_core::{PaginationMeta, PaginationParams};

use crate::ids::{CategoryId, OwnerId, StudentId};
use crate::validation::validate_phone;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "student_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Living,
    /// Moved out; login is refused
    Leave,
}

/// Full student row including the stored secret.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRecord {
    pub id: StudentId,
    pub owner_id: OwnerId,
    pub category_id: Option<CategoryId>,
    pub phone: String,
    pub password: String,
    pub name: String,
    pub sms_phone: Option<String>,
    pub status: StudentStatus,
    pub joining_date: Option<NaiveDate>,
    pub booking_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub owner_id: OwnerId,
    pub category_id: Option<CategoryId>,
    /// Joined from `categories` on list and detail reads
    #[sqlx(default)]
    pub category_title: Option<String>,
    pub phone: String,
    pub name: String,
    /// Number that receives rent reminders, when different from `phone`
    pub sms_phone: Option<String>,
    pub status: StudentStatus,
    pub joining_date: Option<NaiveDate>,
    pub booking_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRecord> for Student {
    fn from(record: StudentRecord) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id,
            category_id: record.category_id,
            category_title: None,
            phone: record.phone,
            name: record.name,
            sms_phone: record.sms_phone,
            status: record.status,
            joining_date: record.joining_date,
            booking_amount: record.booking_amount,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "01822222222")]
    pub phone: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(custom(function = "validate_phone"))]
    pub sms_phone: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<StudentStatus>,
    pub joining_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "booking_amount cannot be negative"))]
    pub booking_amount: Option<i64>,
}

/// Only provided fields change. A new password is hashed before storage.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub sms_phone: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<StudentStatus>,
    pub joining_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub booking_amount: Option<i64>,
}

/// Owner-side student list filters.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    /// Substring match over name and phone
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_enum")]
    pub status: Option<StudentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub category_id: Option<i64>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Cross-tenant student list filters for super-admins.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminStudentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_enum")]
    pub status: Option<StudentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub owner_id: Option<i64>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StudentLoginDto {
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentLoginResponse {
    pub token: String,
    pub student: Student,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct StudentDependents {
    pub rents: i64,
    pub payments: i64,
}

impl StudentDependents {
    pub fn is_empty(&self) -> bool {
        self.rents == 0 && self.payments == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_params_empty_values() {
        let json = r#"{"search":"","status":"","category_id":"","page":"x","page_size":""}"#;
        let params: StudentFilterParams = serde_json::from_str(json).unwrap();
        assert!(params.search.is_none());
        assert!(params.status.is_none());
        assert!(params.category_id.is_none());
        assert_eq!(params.pagination.page(), 1);
        assert_eq!(params.pagination.limit(), 10);
    }

    #[test]
    fn test_filter_params_values() {
        let json = r#"{"search":"karim","status":"leave","category_id":"4","page_size":"25"}"#;
        let params: StudentFilterParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.search.as_deref(), Some("karim"));
        assert_eq!(params.status, Some(StudentStatus::Leave));
        assert_eq!(params.category_id, Some(4));
        assert_eq!(params.pagination.limit(), 25);
    }

    #[test]
    fn test_create_validation() {
        let dto = CreateStudentDto {
            name: "Karim".to_string(),
            phone: "01822222222".to_string(),
            password: "secret1".to_string(),
            sms_phone: Some("123".to_string()),
            category_id: None,
            status: None,
            joining_date: None,
            booking_amount: None,
        };
        assert!(dto.validate().is_err());

        let dto = CreateStudentDto {
            sms_phone: None,
            ..dto
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_default_status_is_living() {
        assert_eq!(StudentStatus::default(), StudentStatus::Living);
    }
}
