//! Owner signup, phone verification and login.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
