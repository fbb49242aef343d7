//! Cross-tenant administration: super-admin accounts, and owners and
//! students across every tenant.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
