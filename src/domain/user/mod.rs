//! User domain module.
//!
//! The User aggregate carries the profile plus three mirrored edge sets:
//! followers, following, and enrolled plans. The application layer keeps the
//! mirrors on counterparty aggregates in sync.

mod aggregate;
mod errors;

pub use aggregate::User;
pub use errors::UserError;
