//! HTTP adapter for user and relationship endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::UserHandlers;
pub use routes::user_routes;
