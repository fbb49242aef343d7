//! Page-based pagination for list endpoints.
//!
//! Every list endpoint accepts `page` (1-indexed) and `page_size` query
//! parameters. Non-numeric input is not an error: it falls back to the
//! defaults (`page = 1`, `page_size = 10`).
//!
//! # Example
//!
//! ```ignore
//! use hostelhub_core::pagination::{PaginationParams, PaginationMeta};
//!
//! async fn list_students(
//!     Query(params): Query<PaginationParams>,
//! ) -> Result<Json<PaginatedStudentsResponse>, AppError> {
//!     let limit = params.limit();
//!     let offset = params.offset();
//!
//!     let students = fetch_students(limit, offset).await?;
//!     let total = count_students().await?;
//!
//!     let meta = PaginationMeta::new(&params, total);
//!     Ok(Json(PaginatedStudentsResponse { data: students, meta }))
//! }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_lenient_i64;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Highest page whose offset still fits in an `i64` at any page size.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// Metadata about a paginated response.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "data": [...],
///   "meta": {
///     "total": 42,
///     "page": 2,
///     "page_size": 10,
///     "total_pages": 5,
///     "has_more": true
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items matching the filters, across all pages
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub page_size: i64,
    /// Number of pages for `total` at this page size
    pub total_pages: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let page = params.page();
        let page_size = params.limit();
        let total = total.max(0);
        let total_pages = total / page_size + i64::from(total % page_size != 0);

        Self {
            total,
            page,
            page_size,
            total_pages,
            has_more: params.offset().saturating_add(page_size) < total,
        }
    }
}

/// Query parameters for pagination.
///
/// - `page` is clamped to the range [1, [`MAX_PAGE`]]
/// - `page_size` is clamped to the range [1, 100]
#[derive(Debug, Clone, Hash, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page_size: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(DEFAULT_PAGE),
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

impl PaginationParams {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Returns the effective page, clamped to [1, `MAX_PAGE`].
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE).clamp(1, MAX_PAGE)
    }

    /// Returns the effective page size, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Returns the number of rows to skip for the current page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_none_values() {
        let params = PaginationParams {
            page: None,
            page_size: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_offset_from_page() {
        let params = PaginationParams::new(3, 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_page_size_boundary_cases() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
        ];

        for (input, expected) in test_cases {
            let params = PaginationParams {
                page: Some(1),
                page_size: input,
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_page_below_one_is_clamped() {
        let params = PaginationParams::new(-4, 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let json = r#"{"page":"9223372036854775807","page_size":"100"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), MAX_PAGE);
        assert_eq!(params.offset(), (MAX_PAGE - 1) * 100);

        let meta = PaginationMeta::new(&params, 5);
        assert_eq!(meta.page, MAX_PAGE);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_more);

        let meta = PaginationMeta::new(&PaginationParams::new(1, 10), i64::MAX);
        assert_eq!(meta.total_pages, i64::MAX / 10 + 1);
        assert!(meta.has_more);
    }

    #[test]
    fn test_deserialize_non_numeric_falls_back() {
        let json = r#"{"page":"two","page_size":"lots"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_deserialize_with_values() {
        let json = r#"{"page":"4","page_size":"25"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 4);
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 75);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, PaginationParams { page: None, page_size: None });
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_meta_last_page() {
        let meta = PaginationMeta::new(&PaginationParams::new(3, 10), 25);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_has_more() {
        let meta = PaginationMeta::new(&PaginationParams::new(1, 10), 25);
        assert_eq!(meta.total, 25);
        assert_eq!(meta.page_size, 10);
        assert!(meta.has_more);
    }

    #[test]
    fn test_meta_zero_total() {
        let meta = PaginationMeta::new(&PaginationParams::default(), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_serialize() {
        let meta = PaginationMeta::new(&PaginationParams::new(2, 20), 100);
        let serialized = serde_json::to_string(&meta).unwrap();
        assert!(serialized.contains(r#""total":100"#));
        assert!(serialized.contains(r#""page":2"#));
        assert!(serialized.contains(r#""page_size":20"#));
        assert!(serialized.contains(r#""total_pages":5"#));
        assert!(serialized.contains(r#""has_more":true"#));
    }
}
