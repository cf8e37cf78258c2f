//! ListFollowCandidatesHandler - users the actor could follow.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Query for users not yet connected to the actor.
#[derive(Debug, Clone)]
pub struct ListFollowCandidatesQuery {
    pub actor_id: UserId,
}

/// Handler for the follow-candidate listing.
pub struct ListFollowCandidatesHandler {
    users: Arc<dyn UserRepository>,
}

impl ListFollowCandidatesHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Lists all users except the actor, the actor's followers, and anyone
    /// the actor already follows.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the actor does not resolve
    pub async fn handle(&self, query: ListFollowCandidatesQuery) -> Result<Vec<User>, UserError> {
        let actor = self
            .users
            .find_by_id(&query.actor_id)
            .await?
            .ok_or_else(|| UserError::not_found(query.actor_id.clone()))?;

        let candidates = self
            .users
            .find_all()
            .await?
            .into_iter()
            .filter(|u| {
                u.id() != actor.id()
                    && !actor.is_following(u.id())
                    && !actor.followers().contains(u.id())
            })
            .collect();

        Ok(candidates)
    }
}
