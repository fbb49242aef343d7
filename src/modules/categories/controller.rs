use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use hostelhub_core::AppError;
use hostelhub_models::{CategoryId, MessageResponse};

use crate::middleware::auth::AuthOwner;
use crate::modules::ErrorResponse;
use crate::modules::categories::model::{
    Category, CategoryFilterParams, CreateCategoryDto, PaginatedCategoriesResponse,
    UpdateCategoryDto,
};
use crate::modules::categories::service::CategoryService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Categories"
)]
#[instrument(skip(state, dto))]
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthOwner,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create_category(&state.db, auth.owner_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(CategoryFilterParams),
    responses(
        (status = 200, description = "Paginated categories", body = PaginatedCategoriesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(filters): Query<CategoryFilterParams>,
) -> Result<Json<PaginatedCategoriesResponse>, AppError> {
    let categories = CategoryService::get_categories(&state.db, auth.owner_id(), filters).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryService::get_category(&state.db, auth.owner_id(), id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Categories"
)]
#[instrument(skip(state, dto))]
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<CategoryId>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryService::update_category(&state.db, auth.owner_id(), id, dto).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category has students or rents", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("owner_cookie" = [])),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<CategoryId>,
) -> Result<Json<MessageResponse>, AppError> {
    CategoryService::delete_category(&state.db, auth.owner_id(), id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
