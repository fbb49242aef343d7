//! Rent models, the current-month window and the billing summary.
//!
//! A rent row is one student's bill for one month. The month is implied by
//! `created_at`; there is no separate period column. A bill's total is
//! `rent_amount + external_amount + previous_due` and what has been paid is
//! `rent_paid + external_paid`. Nullable amounts count as zero.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use hostelhub_core::serde::{
    deserialize_optional_date, deserialize_optional_i64, deserialize_optional_string,
};
use hostelhub_core::{PaginationMeta, PaginationParams};

use crate::ids::{CategoryId, OwnerId, RentId, StudentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rent {
    pub id: RentId,
    pub owner_id: OwnerId,
    pub student_id: StudentId,
    pub category_id: Option<CategoryId>,
    pub rent_amount: i64,
    pub external_amount: i64,
    pub rent_paid: i64,
    pub external_paid: Option<i64>,
    /// Unpaid balance carried over from the student's previous bill
    pub previous_due: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub student_name: Option<String>,
    #[sqlx(default)]
    pub student_phone: Option<String>,
    #[sqlx(default)]
    pub category_title: Option<String>,
}

impl Rent {
    pub fn total(&self) -> i64 {
        self.rent_amount + self.external_amount + self.previous_due.unwrap_or(0)
    }

    pub fn paid(&self) -> i64 {
        self.rent_paid + self.external_paid.unwrap_or(0)
    }

    /// Outstanding balance, which may be negative after an overpayment.
    pub fn due(&self) -> i64 {
        self.total() - self.paid()
    }
}

/// Billing totals over a set of rents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RentSummary {
    /// Distinct students billed
    pub total_students: i64,
    pub total_rent: i64,
    pub total_paid: i64,
    pub total_due: i64,
}

impl RentSummary {
    pub fn from_rents(rents: &[Rent]) -> Self {
        let students: HashSet<StudentId> = rents.iter().map(|r| r.student_id).collect();
        let total_rent: i64 = rents.iter().map(Rent::total).sum();
        let total_paid: i64 = rents.iter().map(Rent::paid).sum();

        Self {
            total_students: students.len() as i64,
            total_rent,
            total_paid,
            total_due: total_rent - total_paid,
        }
    }
}

/// Half-open UTC range `[start, end)` covering the calendar month of `now`.
pub fn month_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let (year, month) = (now.year(), now.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    (
        first_of_month(year, month),
        first_of_month(next_year, next_month),
    )
}

fn first_of_month(year: i32, month: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Filters for `GET /api/rent/current`.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CurrentRentParams {
    /// Substring match over student name and phone
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub category_id: Option<i64>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Filters for `GET /api/rents`.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RentHistoryParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    /// First day included (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub from: Option<NaiveDate>,
    /// Last day included (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedRentsResponse {
    pub data: Vec<Rent>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentRentResponse {
    pub data: Vec<Rent>,
    pub meta: PaginationMeta,
    /// Totals over the whole month, not just this page
    pub summary: RentSummary,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

/// Bills one student. Omitted amounts come from the student's category.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRentDto {
    pub student_id: StudentId,
    #[validate(range(min = 0))]
    pub rent_amount: Option<i64>,
    #[validate(range(min = 0))]
    pub external_amount: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct GenerateRentsResponse {
    pub created: i64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}
