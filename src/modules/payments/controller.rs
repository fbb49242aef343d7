use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use hostelhub_core::AppError;

use crate::metrics::track_payment_recorded;
use crate::middleware::auth::AuthOwner;
use crate::modules::ErrorResponse;
use crate::modules::payments::model::{
    CreatePaymentDto, PaginatedPaymentsResponse, PaymentFilterParams, PaymentReceipt,
};
use crate::modules::payments::service::PaymentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Record a payment against a rent
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentReceipt),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Rent not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Payments"
)]
#[instrument(skip(state, dto))]
pub async fn create_payment(
    State(state): State<AppState>,
    auth: AuthOwner,
    ValidatedJson(dto): ValidatedJson<CreatePaymentDto>,
) -> Result<(StatusCode, Json<PaymentReceipt>), AppError> {
    let kind = dto.kind;
    let amount = dto.amount;
    let receipt = PaymentService::record_payment(&state.db, auth.owner_id(), dto).await?;
    track_payment_recorded(kind.as_str(), amount);
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentFilterParams),
    responses(
        (status = 200, description = "Paginated payments", body = PaginatedPaymentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Payments"
)]
#[instrument(skip(state))]
pub async fn get_payments(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(params): Query<PaymentFilterParams>,
) -> Result<Json<PaginatedPaymentsResponse>, AppError> {
    let payments = PaymentService::get_payments(&state.db, auth.owner_id(), params).await?;
    Ok(Json(payments))
}
