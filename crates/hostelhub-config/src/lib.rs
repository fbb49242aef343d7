//! # HostelHub Config
//!
//! Configuration types for the HostelHub API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT signing, token lifetimes and cookie flags
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection pool settings
//! - [`sms`]: SMS gateway configuration
//! - [`otp`]: One-time password lifetime
//! - [`server`]: Bind address, request timeout and feature switches
//!
//! Unset or unparseable variables fall back to their defaults.
//!
//! # Example
//!
//! ```ignore
//! use hostelhub_config::{JwtConfig, CorsConfig, SmsConfig};
//!
//! // Load all configs from environment
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let sms_config = SmsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod otp;
pub mod server;
pub mod sms;

mod env;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use sms::SmsConfig;
