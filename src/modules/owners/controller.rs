use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use tracing::instrument;

use hostelhub_auth::issue_owner_token;
use hostelhub_core::AppError;
use hostelhub_models::{MessageResponse, TokenType};

use crate::metrics::{track_login, track_owner_signup, track_token_issued};
use crate::modules::ErrorResponse;
use crate::modules::owners::model::{
    Owner, OwnerLoginDto, OwnerLoginResponse, OwnerSignupDto, OwnerSignupResponse, ResendOtpDto,
    VerifyOtpDto,
};
use crate::modules::owners::service::OwnerService;
use crate::state::AppState;
use crate::utils::cookies::auth_cookie;
use crate::validator::ValidatedJson;

/// Register an owner and send a verification code
#[utoipa::path(
    post,
    path = "/api/owner/signup",
    request_body = OwnerSignupDto,
    responses(
        (status = 201, description = "Owner created, OTP sent", body = OwnerSignupResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Phone or subdomain already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Owners"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OwnerSignupDto>,
) -> Result<(StatusCode, Json<OwnerSignupResponse>), AppError> {
    let (owner, otp) = OwnerService::signup(&state.db, dto, &state.otp_config).await?;
    track_owner_signup();

    state
        .sms
        .send_otp(&owner.phone, &otp.code, state.otp_config.ttl_seconds)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(OwnerSignupResponse {
            message: "Verification code sent".to_string(),
            owner,
            otp_expires_at: otp.expires_at,
        }),
    ))
}

/// Verify the phone number with the code from signup
#[utoipa::path(
    post,
    path = "/api/owner/verify-otp",
    request_body = VerifyOtpDto,
    responses(
        (status = 200, description = "Owner is active", body = Owner),
        (status = 400, description = "Invalid, expired or exhausted OTP", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    ),
    tag = "Owners"
)]
#[instrument(skip(state, dto))]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyOtpDto>,
) -> Result<Json<Owner>, AppError> {
    let owner = OwnerService::verify_otp(&state.db, dto, &state.otp_config).await?;
    Ok(Json(owner))
}

/// Issue a new verification code
#[utoipa::path(
    post,
    path = "/api/owner/resend-otp",
    request_body = ResendOtpDto,
    responses(
        (status = 200, description = "New OTP sent", body = MessageResponse),
        (status = 400, description = "Owner already verified", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    ),
    tag = "Owners"
)]
#[instrument(skip(state, dto))]
pub async fn resend_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResendOtpDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let otp = OwnerService::resend_otp(&state.db, &dto.phone, &state.otp_config).await?;

    state
        .sms
        .send_otp(dto.phone.trim(), &otp.code, state.otp_config.ttl_seconds)
        .await;

    Ok(Json(MessageResponse::new("Verification code sent")))
}

/// Owner login
#[utoipa::path(
    post,
    path = "/api/owner/login",
    request_body = OwnerLoginDto,
    responses(
        (status = 200, description = "Login successful, auth_token cookie set", body = OwnerLoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account not verified", body = ErrorResponse)
    ),
    tag = "Owners"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<OwnerLoginDto>,
) -> Result<(CookieJar, Json<OwnerLoginResponse>), AppError> {
    let role = TokenType::Admin.as_str();
    let owner = match OwnerService::login(&state.db, dto).await {
        Ok(owner) => owner,
        Err(e) => {
            track_login(role, outcome_label(&e));
            return Err(e);
        }
    };

    let token = issue_owner_token(
        owner.id.into_inner(),
        &owner.name,
        &owner.phone,
        &state.jwt_config,
    )?;
    track_login(role, "success");
    track_token_issued(role);

    let jar = jar.add(auth_cookie(TokenType::Admin, token.clone(), &state.jwt_config));
    Ok((jar, Json(OwnerLoginResponse { token, owner })))
}

/// Metrics label for a failed login.
pub(crate) fn outcome_label(err: &AppError) -> &'static str {
    match err.status {
        StatusCode::UNAUTHORIZED => "invalid_credentials",
        StatusCode::FORBIDDEN => "forbidden",
        _ => "error",
    }
}
