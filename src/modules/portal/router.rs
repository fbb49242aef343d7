use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::portal::controller::{get_my_rents, login};
use crate::state::AppState;

pub fn init_portal_public_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Routes that require a student session.
pub fn init_portal_router() -> Router<AppState> {
    Router::new().route("/rents", get(get_my_rents))
}
