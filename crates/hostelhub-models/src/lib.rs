//! # HostelHub Models
//!
//! Domain models and DTOs for the HostelHub API.
//!
//! This crate provides the data structures used throughout the application:
//! database rows, request/response DTOs, list filters and validation rules.
//!
//! # Modules
//!
//! - [`auth`]: Session responses and re-exported token claims
//! - [`categories`]: Rent categories
//! - [`ids`]: Strongly-typed `i64` identifiers
//! - [`owners`]: Owners (tenants), signup and OTP DTOs
//! - [`payments`]: Payments credited against rents
//! - [`rents`]: Monthly rents, the month window and the billing summary
//! - [`students`]: Students
//! - [`super_admins`]: Cross-tenant operators
//! - [`validation`]: Custom validator rules
//!
//! Row types that hold secrets (`OwnerRecord`, `StudentRecord`,
//! `SuperAdminRecord`) do not implement `Serialize`.

pub mod auth;
pub mod categories;
pub mod ids;
pub mod owners;
pub mod payments;
pub mod rents;
pub mod students;
pub mod super_admins;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use auth::{Claims, MessageResponse, SessionResponse, TokenType};
pub use ids::{CategoryId, OwnerId, PaymentId, RentId, StudentId, SuperAdminId};
pub use owners::{Owner, OwnerRecord, OwnerStatus};
pub use rents::{Rent, RentSummary, month_window};
pub use students::{Student, StudentRecord, StudentStatus};
pub use super_admins::{SuperAdmin, SuperAdminRecord, SuperAdminStatus};
