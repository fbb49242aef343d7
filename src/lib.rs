//! # HostelHub API
//!
//! A multi-tenant hostel management API built with Axum and PostgreSQL.
//!
//! Hostel owners sign up with a phone number, verify it by SMS one-time
//! code, and then manage their own rent categories, students, monthly rents
//! and payments. Students log in to read their own rents. Super-admins
//! operate across every tenant.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Route guards and session extractors
//! ├── modules/          # Feature modules
//! │   ├── owners/       # Signup, OTP verification, login
//! │   ├── categories/   # Rent categories
//! │   ├── students/     # Student CRUD (owner and super-admin)
//! │   ├── rents/        # Monthly rents and bulk generation
//! │   ├── payments/     # Payments credited against rents
//! │   ├── portal/       # Student login and own rents
//! │   ├── super_admin/  # Cross-tenant administration
//! │   └── session/      # /auth/me and logout
//! └── utils/            # Tenant filters, OTP, SMS, cookies
//! ```
//!
//! Each feature module has the same layout:
//!
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: Queries and business rules
//! - `model.rs`: Re-exports from `hostelhub-models`
//! - `router.rs`: Axum router for the group
//!
//! ## Sessions
//!
//! There are three token types, `admin` (owner), `student` and
//! `super_admin`. A token is accepted as `Authorization: Bearer <token>` or
//! from the cookie named for its type (`auth_token`, `student_token`,
//! `super_admin_token`). Each route group is guarded by one policy, and a
//! token of another type is rejected. Browsers asking for HTML are
//! redirected to the group's login page instead of receiving a 401.
//!
//! ## Tenant isolation
//!
//! Every owner-scoped query is filtered by the session's tenant through
//! [`utils::tenant::TenantFilter`]. Ids in a request body or path never
//! choose the tenant.
//!
//! ## Workspace crates
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | `hostelhub-core` | `AppError`, pagination, password hashing |
//! | `hostelhub-config` | Environment-driven configuration |
//! | `hostelhub-db` | Pool construction and migrations |
//! | `hostelhub-auth` | JWT claims, issuing and transport |
//! | `hostelhub-models` | Rows, DTOs and validation rules |
//! | `hostelhub-cli` | Super-admin bootstrap and seeding |

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use hostelhub_auth;
pub use hostelhub_config;
pub use hostelhub_core;
pub use hostelhub_db;
pub use hostelhub_models;
