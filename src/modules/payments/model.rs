//! Payment data models and DTOs.
//!
//! Re-exported from the `hostelhub-models` crate.

pub use hostelhub_models::payments::*;
