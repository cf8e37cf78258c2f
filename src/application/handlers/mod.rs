//! Command and query handlers.
//!
//! One handler per operation, in the style of thin orchestrators: resolve
//! the acting identity (passed in explicitly), load aggregates, apply domain
//! transitions, persist. Two-aggregate operations commit each side as its own
//! atomic unit and use the convergent-retry saves in [`sync`] for every
//! read-modify-write.

pub mod enrollment;
pub mod progress;
pub mod relationship;
pub mod user;

mod plan_queries;
mod sync;

pub use plan_queries::PlanQueries;
