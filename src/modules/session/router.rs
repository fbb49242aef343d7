use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::session::controller::{logout, me};
use crate::state::AppState;

pub fn init_session_router() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/logout", post(logout))
}
