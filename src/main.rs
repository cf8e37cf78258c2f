//! learnhub server binary.
//!
//! Wires the in-memory store and mock session validator into the HTTP
//! routers and serves the API. Swapping in real adapters only changes the
//! construction here; the routers and handlers are adapter-agnostic.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, middleware, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use learnhub::adapters::auth::MockSessionValidator;
use learnhub::adapters::http::middleware::{auth_middleware, AuthState};
use learnhub::adapters::http::{plan_routes, user_routes, PlanHandlers, UserHandlers};
use learnhub::adapters::store::{InMemoryPlanRepository, InMemoryUserRepository};
use learnhub::application::handlers::enrollment::{
    CreatePlanHandler, DeletePlanHandler, EnrollInPlanHandler, UnenrollFromPlanHandler,
    UpdatePlanHandler,
};
use learnhub::application::handlers::progress::{
    AddTopicHandler, RemoveTopicHandler, SetTopicCompletionHandler, UpdateTopicHandler,
};
use learnhub::application::handlers::relationship::{
    FollowUserHandler, ListFollowCandidatesHandler, UnfollowUserHandler,
};
use learnhub::application::handlers::user::{
    DeleteAccountHandler, EnsureUserHandler, GetUserHandler, UpdateProfileHandler,
};
use learnhub::application::handlers::PlanQueries;
use learnhub::config::AppConfig;
use learnhub::ports::{PlanRepository, SessionValidator, UserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let plans: Arc<dyn PlanRepository> = Arc::new(InMemoryPlanRepository::new());
    let validator: Arc<dyn SessionValidator> =
        Arc::new(MockSessionValidator::new().with_test_user("dev-token", "dev-user"));

    let app = build_router(&config, users, plans, validator);
    let addr = config.server.socket_addr();

    tracing::info!(%addr, "learnhub listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(
    config: &AppConfig,
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
    validator: Arc<dyn SessionValidator>,
) -> Router {
    let user_handlers = UserHandlers::new(
        Arc::new(EnsureUserHandler::new(users.clone())),
        Arc::new(GetUserHandler::new(users.clone())),
        Arc::new(UpdateProfileHandler::new(users.clone())),
        Arc::new(DeleteAccountHandler::new(users.clone(), plans.clone())),
        Arc::new(FollowUserHandler::new(users.clone())),
        Arc::new(UnfollowUserHandler::new(users.clone())),
        Arc::new(ListFollowCandidatesHandler::new(users.clone())),
    );

    let plan_handlers = PlanHandlers::new(
        Arc::new(CreatePlanHandler::new(plans.clone())),
        Arc::new(UpdatePlanHandler::new(plans.clone())),
        Arc::new(DeletePlanHandler::new(users.clone(), plans.clone())),
        Arc::new(EnrollInPlanHandler::new(users.clone(), plans.clone())),
        Arc::new(UnenrollFromPlanHandler::new(users.clone(), plans.clone())),
        Arc::new(AddTopicHandler::new(plans.clone())),
        Arc::new(UpdateTopicHandler::new(plans.clone())),
        Arc::new(RemoveTopicHandler::new(plans.clone())),
        Arc::new(SetTopicCompletionHandler::new(plans.clone())),
        Arc::new(PlanQueries::new(users.clone(), plans.clone())),
    );

    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::new()
    } else {
        CorsLayer::new().allow_origin(origins)
    };

    let auth_state: AuthState = validator;

    Router::new()
        .nest("/api", user_routes(user_handlers))
        .nest("/api/plans", plan_routes(plan_handlers))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
}
