use axum::{Router, routing::post};

use crate::modules::owners::controller::{login, resend_otp, signup, verify_otp};
use crate::state::AppState;

pub fn init_owners_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/verify-otp", post(verify_otp))
        .route("/resend-otp", post(resend_otp))
        .route("/login", post(login))
}
