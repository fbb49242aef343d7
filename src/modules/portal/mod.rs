//! Student self-service: login and the student's own rents.

pub mod controller;
pub mod router;
pub mod service;
