//! User profile and account lifecycle handlers.

mod delete_account;
mod ensure_user;
mod get_user;
mod update_profile;

pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler};
pub use ensure_user::{EnsureUserCommand, EnsureUserHandler};
pub use get_user::{GetUserHandler, GetUserQuery};
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
