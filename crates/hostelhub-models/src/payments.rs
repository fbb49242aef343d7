use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use hostelhub_core::serde::{deserialize_optional_date, deserialize_optional_i64};
use hostelhub_core::{PaginationMeta, PaginationParams};

use crate::ids::{OwnerId, PaymentId, RentId, StudentId};
use crate::rents::Rent;

/// Which paid column of the rent a payment is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "payment_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Credited to `rent_paid`
    Rent,
    /// Credited to `external_paid`
    External,
}

impl PaymentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentKind::Rent => "rent",
            PaymentKind::External => "external",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: PaymentId,
    pub owner_id: OwnerId,
    pub student_id: StudentId,
    pub rent_id: Option<RentId>,
    pub amount: i64,
    pub kind: PaymentKind,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub student_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentDto {
    pub rent_id: RentId,
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i64,
    pub kind: PaymentKind,
    #[validate(length(max = 255))]
    pub note: Option<String>,
}

/// The stored payment and the rent it was credited to.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub rent: Rent,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedPaymentsResponse {
    pub data: Vec<Payment>,
    pub meta: PaginationMeta,
}
