use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use hostelhub_core::serde::deserialize_optional_string;
use hostelhub_core::{PaginationMeta, PaginationParams};

use crate::ids::{CategoryId, OwnerId};

/// A rent category (room type) with its monthly amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub owner_id: OwnerId,
    #[schema(example = "Double room")]
    pub title: String,
    pub rent_amount: i64,
    /// Utilities and other monthly extras
    pub external_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "title is required"))]
    pub title: String,
    #[validate(range(min = 0, message = "rent_amount cannot be negative"))]
    pub rent_amount: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "external_amount cannot be negative"))]
    pub external_amount: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub rent_amount: Option<i64>,
    #[validate(range(min = 0))]
    pub external_amount: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryFilterParams {
    /// Substring match over the title
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedCategoriesResponse {
    pub data: Vec<Category>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct CategoryDependents {
    pub students: i64,
    pub rents: i64,
}

impl CategoryDependents {
    pub fn is_empty(&self) -> bool {
        self.students == 0 && self.rents == 0
    }
}
