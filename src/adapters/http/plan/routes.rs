//! HTTP routes for learning plan endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    add_topic, create_plan, delete_plan, enroll_in_plan, followed_creators_feed, get_plan,
    list_enrolled_plans, list_plans, remove_topic, set_topic_completion, unenroll_from_plan,
    update_plan, update_topic, PlanHandlers,
};

/// Creates the plan router with all endpoints.
///
/// Static segments are registered before the `:id` capture so `/enrolled`
/// and `/feed` never parse as plan ids.
pub fn plan_routes(handlers: PlanHandlers) -> Router {
    Router::new()
        .route("/", post(create_plan))
        .route("/", get(list_plans))
        .route("/enrolled", get(list_enrolled_plans))
        .route("/feed", get(followed_creators_feed))
        .route("/:id", get(get_plan))
        .route("/:id", put(update_plan))
        .route("/:id", delete(delete_plan))
        .route("/:id/enroll", post(enroll_in_plan))
        .route("/:id/enroll", delete(unenroll_from_plan))
        .route("/:id/topics", post(add_topic))
        .route("/:id/topics/:topic_id", put(update_topic))
        .route("/:id/topics/:topic_id", delete(remove_topic))
        .route("/:id/topics/:topic_id/completion", put(set_topic_completion))
        .with_state(handlers)
}
