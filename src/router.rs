use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::{REQUEST_ID_HEADER, logging_middleware};
use crate::metrics::metrics_middleware;
use crate::middleware::guard::{require_owner, require_student, require_super_admin};
use crate::modules::categories::router::init_categories_router;
use crate::modules::owners::router::init_owners_router;
use crate::modules::payments::router::init_payments_router;
use crate::modules::portal::router::{init_portal_public_router, init_portal_router};
use crate::modules::rents::router::init_rents_router;
use crate::modules::session::router::init_session_router;
use crate::modules::students::router::init_students_router;
use crate::modules::super_admin::router::{
    init_super_admin_public_router, init_super_admin_router,
};
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let owner_guard = || middleware::from_fn_with_state(state.clone(), require_owner);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/owner", init_owners_router())
                .nest(
                    "/student",
                    init_portal_router()
                        .route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            require_student,
                        ))
                        .merge(init_portal_public_router()),
                )
                .nest(
                    "/super-admin",
                    init_super_admin_router()
                        .route_layer(middleware::from_fn_with_state(
                            state.clone(),
                            require_super_admin,
                        ))
                        .merge(init_super_admin_public_router()),
                )
                .nest(
                    "/categories",
                    init_categories_router().route_layer(owner_guard()),
                )
                .nest(
                    "/students",
                    init_students_router().route_layer(owner_guard()),
                )
                .nest(
                    "/payments",
                    init_payments_router().route_layer(owner_guard()),
                )
                .merge(init_rents_router().route_layer(owner_guard()))
                .merge(init_session_router()),
        )
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(state.clone())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.server_config.request_timeout_secs,
        )))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([REQUEST_ID_HEADER])
        .allow_credentials(true)
}
