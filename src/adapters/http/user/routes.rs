//! HTTP routes for user endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    delete_me, follow_user, get_me, get_user, list_follow_candidates, unfollow_user, update_me,
    UserHandlers,
};

/// Creates the user router with all endpoints.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/me", put(update_me))
        .route("/me", delete(delete_me))
        .route("/users/candidates", get(list_follow_candidates))
        .route("/users/:id", get(get_user))
        .route("/users/:id/follow", post(follow_user))
        .route("/users/:id/follow", delete(unfollow_user))
        .with_state(handlers)
}
