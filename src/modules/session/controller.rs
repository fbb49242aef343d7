use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use tracing::{info, instrument};

use hostelhub_core::AppError;
use hostelhub_models::{MessageResponse, SessionResponse};

use crate::middleware::auth::AnySession;
use crate::modules::ErrorResponse;
use crate::modules::session::service::SessionService;
use crate::state::AppState;
use crate::utils::cookies::clear_auth_cookies;

/// The account behind the current session
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current account, tagged by token type", body = SessionResponse),
        (status = 401, description = "Missing, invalid or stale session", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = []),
        ("owner_cookie" = []),
        ("student_cookie" = []),
        ("super_admin_cookie" = [])
    ),
    tag = "Session"
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    session: AnySession,
) -> Result<Json<SessionResponse>, AppError> {
    let account = SessionService::current(&state.db, &session.0).await?;
    Ok(Json(account))
}

/// Clear every auth cookie
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Cookies cleared", body = MessageResponse)
    ),
    tag = "Session"
)]
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    info!("Session cookies cleared");
    (
        clear_auth_cookies(jar),
        Json(MessageResponse::new("Logged out successfully")),
    )
}
