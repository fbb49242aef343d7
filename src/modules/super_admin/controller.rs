use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;
use tracing::{instrument, warn};

use hostelhub_auth::issue_super_admin_token;
use hostelhub_core::AppError;
use hostelhub_models::students::{PaginatedStudentsResponse, Student, UpdateStudentDto};
use hostelhub_models::{MessageResponse, OwnerId, StudentId, TokenType};

use crate::metrics::{track_login, track_token_issued};
use crate::middleware::auth::AuthSuperAdmin;
use crate::modules::ErrorResponse;
use crate::modules::owners::controller::outcome_label;
use crate::modules::students::service::{StudentQuery, StudentService};
use crate::modules::super_admin::model::{
    AdminStudentFilterParams, OwnerFilterParams, OwnerWithStats, PaginatedOwnersResponse,
    SuperAdmin, SuperAdminLoginDto, SuperAdminLoginResponse, SuperAdminSignupDto, UpdateOwnerDto,
};
use crate::modules::super_admin::service::{OwnerAdminService, SuperAdminService};
use crate::state::AppState;
use crate::utils::cookies::auth_cookie;
use crate::utils::tenant::Scope;
use crate::validator::ValidatedJson;

/// Create a super-admin account
///
/// Only available when `SUPER_ADMIN_SIGNUP_ENABLED=true`.
#[utoipa::path(
    post,
    path = "/api/super-admin/signup",
    operation_id = "super_admin_signup",
    request_body = SuperAdminSignupDto,
    responses(
        (status = 201, description = "Super-admin created", body = SuperAdmin),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Signup is disabled", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    ),
    tag = "Super Admin"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SuperAdminSignupDto>,
) -> Result<(StatusCode, Json<SuperAdmin>), AppError> {
    if !state.server_config.super_admin_signup_enabled {
        warn!("Super-admin signup attempted while disabled");
        return Err(AppError::forbidden("Super-admin signup is disabled"));
    }

    let super_admin = SuperAdminService::signup(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(super_admin)))
}

#[utoipa::path(
    post,
    path = "/api/super-admin/login",
    operation_id = "super_admin_login",
    request_body = SuperAdminLoginDto,
    responses(
        (status = 200, description = "Login successful, super_admin_token cookie set", body = SuperAdminLoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account inactive", body = ErrorResponse)
    ),
    tag = "Super Admin"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<SuperAdminLoginDto>,
) -> Result<(CookieJar, Json<SuperAdminLoginResponse>), AppError> {
    let role = TokenType::SuperAdmin.as_str();
    let super_admin = match SuperAdminService::login(&state.db, dto).await {
        Ok(super_admin) => super_admin,
        Err(e) => {
            track_login(role, outcome_label(&e));
            return Err(e);
        }
    };

    let token = issue_super_admin_token(
        super_admin.id.into_inner(),
        &super_admin.name,
        &super_admin.username,
        &state.jwt_config,
    )?;
    track_login(role, "success");
    track_token_issued(role);

    let jar = jar.add(auth_cookie(
        TokenType::SuperAdmin,
        token.clone(),
        &state.jwt_config,
    ));
    Ok((jar, Json(SuperAdminLoginResponse { token, super_admin })))
}

#[utoipa::path(
    get,
    path = "/api/super-admin/owners",
    params(OwnerFilterParams),
    responses(
        (status = 200, description = "Owners with student counts", body = PaginatedOwnersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state))]
pub async fn get_owners(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Query(params): Query<OwnerFilterParams>,
) -> Result<Json<PaginatedOwnersResponse>, AppError> {
    let owners = OwnerAdminService::get_owners(&state.db, params).await?;
    Ok(Json(owners))
}

#[utoipa::path(
    get,
    path = "/api/super-admin/owners/{id}",
    params(("id" = i64, Path, description = "Owner ID")),
    responses(
        (status = 200, description = "Owner details", body = OwnerWithStats),
        (status = 404, description = "Owner not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state))]
pub async fn get_owner(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Path(id): Path<OwnerId>,
) -> Result<Json<OwnerWithStats>, AppError> {
    let owner = OwnerAdminService::get_owner(&state.db, id).await?;
    Ok(Json(owner))
}

#[utoipa::path(
    put,
    path = "/api/super-admin/owners/{id}",
    params(("id" = i64, Path, description = "Owner ID")),
    request_body = UpdateOwnerDto,
    responses(
        (status = 200, description = "Owner updated", body = OwnerWithStats),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 409, description = "Phone or subdomain already taken", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state, dto))]
pub async fn update_owner(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Path(id): Path<OwnerId>,
    ValidatedJson(dto): ValidatedJson<UpdateOwnerDto>,
) -> Result<Json<OwnerWithStats>, AppError> {
    let owner = OwnerAdminService::update_owner(&state.db, id, dto).await?;
    Ok(Json(owner))
}

#[utoipa::path(
    delete,
    path = "/api/super-admin/owners/{id}",
    params(("id" = i64, Path, description = "Owner ID")),
    responses(
        (status = 200, description = "Owner deleted", body = MessageResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 409, description = "Owner still has tenant rows", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state))]
pub async fn delete_owner(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Path(id): Path<OwnerId>,
) -> Result<Json<MessageResponse>, AppError> {
    OwnerAdminService::delete_owner(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Owner deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/super-admin/students",
    operation_id = "admin_get_students",
    params(AdminStudentFilterParams),
    responses(
        (status = 200, description = "Students across all owners", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Query(params): Query<AdminStudentFilterParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let query = StudentQuery {
        search: params.search,
        status: params.status,
        category_id: None,
        owner_id: params.owner_id,
        pagination: params.pagination,
    };
    let students = StudentService::get_students(&state.db, Scope::All, query).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/super-admin/students/{id}",
    operation_id = "admin_get_student",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, Scope::All, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/super-admin/students/{id}",
    operation_id = "admin_update_student",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Phone already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Path(id): Path<StudentId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, Scope::All, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/super-admin/students/{id}",
    operation_id = "admin_delete_student",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student has rents or payments", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("super_admin_cookie" = [])),
    tag = "Super Admin"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    _auth: AuthSuperAdmin,
    Path(id): Path<StudentId>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_student(&state.db, Scope::All, id).await?;
    Ok(Json(MessageResponse::new("Student deleted successfully")))
}
