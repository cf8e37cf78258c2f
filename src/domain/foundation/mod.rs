//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Learnhub domain.

mod auth;
mod errors;
mod ids;
mod progress;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PlanId, TopicId, UserId};
pub use progress::Progress;
pub use timestamp::Timestamp;
