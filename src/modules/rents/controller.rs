use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;

use hostelhub_core::AppError;
use hostelhub_models::RentId;

use crate::metrics::track_rents_generated;
use crate::middleware::auth::AuthOwner;
use crate::modules::ErrorResponse;
use crate::modules::rents::model::{
    CreateRentDto, CurrentRentParams, CurrentRentResponse, GenerateRentsResponse,
    PaginatedRentsResponse, Rent, RentHistoryParams,
};
use crate::modules::rents::service::RentService;
use crate::state::AppState;
use crate::utils::tenant::Scope;
use crate::validator::ValidatedJson;

/// Current-month rents with totals for the month
#[utoipa::path(
    get,
    path = "/api/rent/current",
    params(CurrentRentParams),
    responses(
        (status = 200, description = "Rents created this month", body = CurrentRentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Rents"
)]
#[instrument(skip(state))]
pub async fn get_current_rents(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(params): Query<CurrentRentParams>,
) -> Result<Json<CurrentRentResponse>, AppError> {
    let rents = RentService::get_current(&state.db, auth.owner_id(), params, Utc::now()).await?;
    Ok(Json(rents))
}

#[utoipa::path(
    get,
    path = "/api/rents",
    params(RentHistoryParams),
    responses(
        (status = 200, description = "Paginated rent history", body = PaginatedRentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Rents"
)]
#[instrument(skip(state))]
pub async fn get_rents(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(params): Query<RentHistoryParams>,
) -> Result<Json<PaginatedRentsResponse>, AppError> {
    let rents = RentService::get_history(&state.db, Scope::Tenant(auth.owner_id()), params).await?;
    Ok(Json(rents))
}

#[utoipa::path(
    get,
    path = "/api/rents/{id}",
    params(("id" = i64, Path, description = "Rent ID")),
    responses(
        (status = 200, description = "Rent details", body = Rent),
        (status = 404, description = "Rent not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Rents"
)]
#[instrument(skip(state))]
pub async fn get_rent(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<RentId>,
) -> Result<Json<Rent>, AppError> {
    let rent = RentService::get_rent(&state.db, auth.owner_id(), id).await?;
    Ok(Json(rent))
}

/// Bill one student for the current month
#[utoipa::path(
    post,
    path = "/api/rents",
    request_body = CreateRentDto,
    responses(
        (status = 201, description = "Rent created", body = Rent),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student already billed this month", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Rents"
)]
#[instrument(skip(state, dto))]
pub async fn create_rent(
    State(state): State<AppState>,
    auth: AuthOwner,
    ValidatedJson(dto): ValidatedJson<CreateRentDto>,
) -> Result<(StatusCode, Json<Rent>), AppError> {
    let rent = RentService::create_rent(&state.db, auth.owner_id(), dto, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(rent)))
}

/// Bill every living student that has no rent this month
#[utoipa::path(
    post,
    path = "/api/rents/generate",
    responses(
        (status = 200, description = "Number of rents created", body = GenerateRentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Rents"
)]
#[instrument(skip(state))]
pub async fn generate_rents(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<GenerateRentsResponse>, AppError> {
    let generated = RentService::generate(&state.db, auth.owner_id(), Utc::now()).await?;
    track_rents_generated(generated.created as u64);
    Ok(Json(generated))
}
