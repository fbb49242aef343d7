use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::CookieJar;
use tracing::instrument;

use hostelhub_auth::issue_student_token;
use hostelhub_core::{AppError, PaginationParams};
use hostelhub_models::TokenType;
use hostelhub_models::rents::PaginatedRentsResponse;
use hostelhub_models::students::{StudentLoginDto, StudentLoginResponse};

use crate::metrics::{track_login, track_token_issued};
use crate::middleware::auth::AuthStudent;
use crate::modules::ErrorResponse;
use crate::modules::owners::controller::outcome_label;
use crate::modules::portal::service::PortalService;
use crate::modules::rents::service::RentService;
use crate::state::AppState;
use crate::utils::cookies::auth_cookie;
use crate::validator::ValidatedJson;

/// Student login
#[utoipa::path(
    post,
    path = "/api/student/login",
    operation_id = "student_login",
    request_body = StudentLoginDto,
    responses(
        (status = 200, description = "Login successful, student_token cookie set", body = StudentLoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Student has left", body = ErrorResponse)
    ),
    tag = "Student Portal"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<StudentLoginDto>,
) -> Result<(CookieJar, Json<StudentLoginResponse>), AppError> {
    let role = TokenType::Student.as_str();
    let student = match PortalService::login(&state.db, dto).await {
        Ok(student) => student,
        Err(e) => {
            track_login(role, outcome_label(&e));
            return Err(e);
        }
    };

    let token = issue_student_token(
        student.id.into_inner(),
        student.owner_id.into_inner(),
        &student.name,
        &student.phone,
        &state.jwt_config,
    )?;
    track_login(role, "success");
    track_token_issued(role);

    let jar = jar.add(auth_cookie(TokenType::Student, token.clone(), &state.jwt_config));
    Ok((jar, Json(StudentLoginResponse { token, student })))
}

/// The logged-in student's rents, newest first
#[utoipa::path(
    get,
    path = "/api/student/rents",
    params(PaginationParams),
    responses(
        (status = 200, description = "The student's rents", body = PaginatedRentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("student_cookie" = [])),
    tag = "Student Portal"
)]
#[instrument(skip(state))]
pub async fn get_my_rents(
    State(state): State<AppState>,
    auth: AuthStudent,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedRentsResponse>, AppError> {
    let owner_id = auth.owner_id()?;
    let rents =
        RentService::get_student_rents(&state.db, owner_id, auth.student_id(), pagination).await?;
    Ok(Json(rents))
}
