//! Shared helpers for the HTTP layer.
//!
//! - [`cookies`]: Auth cookie construction and clearing
//! - [`otp`]: One-time code generation and checking
//! - [`sms`]: SMS delivery
//! - [`tenant`]: Tenant resolution and list filters

pub mod cookies;
pub mod otp;
pub mod sms;
pub mod tenant;
