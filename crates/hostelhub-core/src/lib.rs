//! # HostelHub Core
//!
//! Core types, errors, and utilities for the HostelHub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-based pagination for list endpoints
//! - [`password`]: bcrypt hashing and credential verification (including legacy plaintext rows)
//! - [`serde`]: Lenient deserializers for query-string parameters
//!
//! # Example
//!
//! ```ignore
//! use hostelhub_core::errors::AppError;
//! use hostelhub_core::password::{hash_password, verify_password};
//!
//! let hash = hash_password("password123")?;
//! if !verify_password("password123", &hash) {
//!     return Err(AppError::unauthorized("Invalid credentials"));
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{constant_time_eq, hash_password, verify_password, verify_student_secret};
