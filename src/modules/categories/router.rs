use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::categories::controller::{
    create_category, delete_category, get_categories, get_category, update_category,
};
use crate::state::AppState;

pub fn init_categories_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category).get(get_categories))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
