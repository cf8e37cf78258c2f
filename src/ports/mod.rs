//! Ports - trait contracts between the application core and the outside.
//!
//! The core depends on two external collaborators: an identity resolver
//! (`SessionValidator`) and a key-addressed aggregate store
//! (`UserRepository`, `PlanRepository`). Adapters provide implementations.

mod plan_repository;
mod session_validator;
mod user_repository;

pub use plan_repository::PlanRepository;
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
