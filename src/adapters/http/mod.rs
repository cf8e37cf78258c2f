//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod error;
pub mod middleware;
pub mod plan;
pub mod user;

pub use plan::{plan_routes, PlanHandlers};
pub use user::{user_routes, UserHandlers};
