use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::super_admin::controller::{
    delete_owner, delete_student, get_owner, get_owners, get_student, get_students, login, signup,
    update_owner, update_student,
};
use crate::state::AppState;

pub fn init_super_admin_public_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Routes that require a super-admin session.
pub fn init_super_admin_router() -> Router<AppState> {
    Router::new()
        .route("/owners", get(get_owners))
        .route(
            "/owners/{id}",
            get(get_owner).put(update_owner).delete(delete_owner),
        )
        .route("/students", get(get_students))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}
