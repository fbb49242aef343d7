//! Super-admin data models and DTOs.
//!
//! Re-exported from the `hostelhub-models` crate.

pub use hostelhub_models::owners::{
    OwnerDependents, OwnerFilterParams, OwnerWithStats, PaginatedOwnersResponse, UpdateOwnerDto,
};
pub use hostelhub_models::students::AdminStudentFilterParams;
pub use hostelhub_models::super_admins::*;
