use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Router の構築
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/user",
            post(handlers::create_user).get(handlers::get_user_list),
        )
        .route(
            "/user/{id}",
            get(handlers::get_user_by_id)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .with_state(state)
}
