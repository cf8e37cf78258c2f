//! Learning plan domain module.
//!
//! A plan exclusively owns its ordered topic list; no topic exists outside a
//! plan. Enrollment is a many-to-many relation with User, represented by two
//! independently stored back-references kept symmetric by the application
//! layer.

mod aggregate;
mod errors;
mod topic;

pub use aggregate::LearningPlan;
pub use errors::PlanError;
pub use topic::Topic;
