//! UpdateProfileHandler - Command handler for editing the own profile.

use std::sync::Arc;

use crate::application::handlers::sync::save_user_with_retry;
use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Command to update the actor's own profile fields.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub name: Option<String>,
    pub picture_url: Option<String>,
}

/// Handler for profile edits.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Applies the provided fields; blank values are skipped.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user does not resolve
    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, UserError> {
        save_user_with_retry(self.users.as_ref(), &cmd.user_id, |u| {
            u.update_profile(cmd.name.clone(), cmd.picture_url.clone());
            Ok(())
        })
        .await
        .map_err(|e| match e.code {
            ErrorCode::UserNotFound => UserError::not_found(cmd.user_id.clone()),
            _ => e.into(),
        })
    }
}
