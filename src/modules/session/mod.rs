//! `GET /api/auth/me` and `POST /api/logout`, shared by every account kind.

pub mod controller;
pub mod router;
pub mod service;
