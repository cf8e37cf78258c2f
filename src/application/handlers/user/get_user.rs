//! GetUserHandler - single-user lookup.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Query for a user by identity.
#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// # Errors
    ///
    /// - `NotFound` if the user does not resolve
    pub async fn handle(&self, query: GetUserQuery) -> Result<User, UserError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or(UserError::NotFound(query.user_id))
    }
}
