//! # HostelHub Auth
//!
//! Authentication types and JWT utilities for the HostelHub API.
//!
//! This crate provides:
//!
//! - [`claims`]: Token claims and the [`TokenType`] discriminator
//! - [`jwt`]: Token issuance and validation
//! - [`transport`]: Token extraction from the bearer header or auth cookies
//!
//! # Token Types
//!
//! | Type | Issued to | Cookie | Default lifetime |
//! |------|-----------|--------|------------------|
//! | `admin` | Hostel owner | `auth_token` | 7 days |
//! | `student` | Student | `student_token` | 7 days |
//! | `super_admin` | Platform operator | `super_admin_token` | 24 hours |
//!
//! There is no server-side revocation; a token is valid until it expires or
//! the signing secret changes.

pub mod claims;
pub mod jwt;
pub mod transport;

// Re-export commonly used types at crate root
pub use claims::{Claims, TokenType};
pub use jwt::{
    TokenRejection, TokenValidation, issue_owner_token, issue_student_token,
    issue_super_admin_token, sign_claims, validate_any_session, validate_token,
};
pub use transport::{AUTH_COOKIES, cookie_name, extract_token, session_cookies};
