use utoipa::ToSchema;

pub mod categories;
pub mod owners;
pub mod payments;
pub mod portal;
pub mod rents;
pub mod session;
pub mod students;
pub mod super_admin;

/// Body of every error response. Dependency conflicts add a `related` map.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
