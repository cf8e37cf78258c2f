//! HTTP adapter for learning plan endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::PlanHandlers;
pub use routes::plan_routes;
