//! EnsureUserHandler - get-or-create on first authentication.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Command carrying the authenticated principal to materialize.
#[derive(Debug, Clone)]
pub struct EnsureUserCommand {
    pub principal: AuthenticatedUser,
}

/// Handler that materializes a User aggregate for a validated principal.
pub struct EnsureUserHandler {
    users: Arc<dyn UserRepository>,
}

impl EnsureUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns the existing user, or creates one from the token claims on
    /// first sight. Existing profile data is never overwritten here.
    pub async fn handle(&self, cmd: EnsureUserCommand) -> Result<User, UserError> {
        if let Some(existing) = self.users.find_by_id(&cmd.principal.id).await? {
            return Ok(existing);
        }

        let mut user = User::new(
            cmd.principal.id.clone(),
            cmd.principal.email.clone(),
            cmd.principal.display_name.clone(),
        );
        self.users.save(&user).await?;
        user.bump_version();

        tracing::info!(user_id = %user.id(), "user created on first authentication");
        Ok(user)
    }
}
