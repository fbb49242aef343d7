use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::rents::controller::{
    create_rent, generate_rents, get_current_rents, get_rent, get_rents,
};
use crate::state::AppState;

/// Mounted at `/api`: the current-month view lives outside `/rents`.
pub fn init_rents_router() -> Router<AppState> {
    Router::new()
        .route("/rent/current", get(get_current_rents))
        .route("/rents", get(get_rents).post(create_rent))
        .route("/rents/generate", post(generate_rents))
        .route("/rents/{id}", get(get_rent))
}
