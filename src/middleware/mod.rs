//! Authentication middleware and extractors.
//!
//! - [`guard`]: Per-group route guards (`require_owner`, `require_student`,
//!   `require_super_admin`) and the [`guard::Session`] they store
//! - [`auth`]: Extractors for handlers (`AuthOwner`, `AuthStudent`,
//!   `AuthSuperAdmin`, `AnySession`)
//!
//! # Flow
//!
//! 1. The client sends a token as `Authorization: Bearer <token>` or in the
//!    cookie named for its type
//! 2. The group's guard validates signature, expiry and type
//! 3. The handler's extractor picks up the validated claims
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthOwner;
//!
//! async fn list_categories(auth: AuthOwner) -> Result<impl IntoResponse, AppError> {
//!     let owner_id = auth.owner_id();
//!     // ...
//! }
//! ```

pub mod auth;
pub mod guard;

pub use auth::{AnySession, AuthOwner, AuthStudent, AuthSuperAdmin};
pub use guard::{GuardPolicy, Session, require_owner, require_student, require_super_admin};
