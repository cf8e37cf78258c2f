//! UnfollowUserHandler - Command handler for removing a follow edge.

use std::sync::Arc;

use crate::application::handlers::sync::save_user_with_retry;
use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Command to make `actor` stop following `target`.
#[derive(Debug, Clone)]
pub struct UnfollowUserCommand {
    pub actor_id: UserId,
    pub target_id: UserId,
}

/// Handler for the unfollow operation.
pub struct UnfollowUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UnfollowUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Removes the follow edge from both aggregates.
    ///
    /// Unfollowing someone not followed is a successful no-op. If the target
    /// account has since been deleted, the actor-side edge is still removed
    /// so stale references do not linger.
    ///
    /// # Errors
    ///
    /// - `SelfReference` if actor and target are the same user
    /// - `NotFound` if the actor does not resolve
    /// - `EdgeSyncFailed` if the follower-side write cannot commit
    pub async fn handle(&self, cmd: UnfollowUserCommand) -> Result<User, UserError> {
        if cmd.actor_id == cmd.target_id {
            return Err(UserError::SelfReference);
        }

        // First write: actor.following.
        let actor = save_user_with_retry(self.users.as_ref(), &cmd.actor_id, |u| {
            u.remove_following(&cmd.target_id);
            Ok(())
        })
        .await
        .map_err(|e| match e.code {
            ErrorCode::UserNotFound => UserError::not_found(cmd.actor_id.clone()),
            _ => e.into(),
        })?;

        // Second write: target.followers. A vanished target means there is
        // nothing left to clean up.
        match save_user_with_retry(self.users.as_ref(), &cmd.target_id, |u| {
            u.remove_follower(&cmd.actor_id);
            Ok(())
        })
        .await
        {
            Ok(_) => {}
            Err(e) if e.code == ErrorCode::UserNotFound => {
                tracing::debug!(target = %cmd.target_id, "unfollow target no longer exists");
            }
            Err(e) => {
                tracing::warn!(
                    actor = %cmd.actor_id,
                    target = %cmd.target_id,
                    error = %e,
                    "follower-side write failed after actor-side commit"
                );
                return Err(UserError::edge_sync_failed(format!(
                    "following removed but follower-side write failed: {}",
                    e
                )));
            }
        }

        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryUserRepository;
    use crate::application::handlers::relationship::{FollowUserCommand, FollowUserHandler};
    use crate::ports::UserRepository;

    fn user(id: &str) -> User {
        User::new(
            UserId::new(id).unwrap(),
            format!("{}@example.com", id),
            None,
        )
    }

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn followed_pair() -> Arc<InMemoryUserRepository> {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.save(&user("alice")).await.unwrap();
        repo.save(&user("bob")).await.unwrap();
        FollowUserHandler::new(repo.clone())
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn unfollow_removes_edge_on_both_sides() {
        let repo = followed_pair().await;
        let handler = UnfollowUserHandler::new(repo.clone());

        let actor = handler
            .handle(UnfollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();

        assert!(!actor.is_following(&uid("bob")));
        let bob = repo.find_by_id(&uid("bob")).await.unwrap().unwrap();
        assert!(bob.followers().is_empty());
    }

    #[tokio::test]
    async fn unfollow_without_edge_is_a_noop() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.save(&user("alice")).await.unwrap();
        repo.save(&user("bob")).await.unwrap();
        let handler = UnfollowUserHandler::new(repo.clone());

        handler
            .handle(UnfollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unfollow_deleted_target_still_cleans_actor_side() {
        let repo = followed_pair().await;
        repo.delete(&uid("bob")).await.unwrap();
        let handler = UnfollowUserHandler::new(repo.clone());

        let actor = handler
            .handle(UnfollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();

        assert!(!actor.is_following(&uid("bob")));
    }

    #[tokio::test]
    async fn unfollow_self_is_rejected() {
        let repo = followed_pair().await;
        let handler = UnfollowUserHandler::new(repo);

        let err = handler
            .handle(UnfollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("alice"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, UserError::SelfReference);
    }
}
