use axum::{Router, routing::post};

use crate::modules::payments::controller::{create_payment, get_payments};
use crate::state::AppState;

pub fn init_payments_router() -> Router<AppState> {
    Router::new().route("/", post(create_payment).get(get_payments))
}
