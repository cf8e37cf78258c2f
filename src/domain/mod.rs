//! Domain layer - aggregates, value objects, and invariant logic.

pub mod foundation;
pub mod plan;
pub mod user;
