//! FollowUserHandler - Command handler for creating a follow edge.

use std::sync::Arc;

use crate::application::handlers::sync::save_user_with_retry;
use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Command to make `actor` follow `target`.
#[derive(Debug, Clone)]
pub struct FollowUserCommand {
    pub actor_id: UserId,
    pub target_id: UserId,
}

/// Handler for the follow operation.
pub struct FollowUserHandler {
    users: Arc<dyn UserRepository>,
}

impl FollowUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Creates the follow edge on both aggregates.
    ///
    /// At-least-once and convergent: already-following succeeds as a no-op,
    /// and the caller may retry the same command after any failure.
    ///
    /// # Errors
    ///
    /// - `SelfReference` if actor and target are the same user
    /// - `NotFound` if either side does not resolve (checked before mutation)
    /// - `EdgeSyncFailed` if the follower-side write cannot commit; the
    ///   actor-side write persists
    pub async fn handle(&self, cmd: FollowUserCommand) -> Result<User, UserError> {
        if cmd.actor_id == cmd.target_id {
            return Err(UserError::SelfReference);
        }

        // Resolve both sides before mutating anything.
        let actor = self
            .users
            .find_by_id(&cmd.actor_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.actor_id.clone()))?;
        let target = self
            .users
            .find_by_id(&cmd.target_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.target_id.clone()))?;

        // No-op only when the edge exists on both sides; a half-committed
        // edge from an earlier partial failure still needs the mirror write.
        if actor.is_following(&cmd.target_id) && target.followers().contains(&cmd.actor_id) {
            return Ok(actor);
        }

        // First write: actor.following.
        let actor = save_user_with_retry(self.users.as_ref(), &cmd.actor_id, |u| {
            u.add_following(&cmd.target_id).map(|_| ())
        })
        .await?;

        // Second write: target.followers. A failure here leaves the edge
        // half-committed; surfaced, not rolled back.
        save_user_with_retry(self.users.as_ref(), &cmd.target_id, |u| {
            u.add_follower(&cmd.actor_id).map(|_| ())
        })
        .await
        .map_err(|e| {
            tracing::warn!(
                actor = %cmd.actor_id,
                target = %cmd.target_id,
                error = %e,
                "follower-side write failed after actor-side commit"
            );
            UserError::edge_sync_failed(format!(
                "following recorded but follower-side write failed: {}",
                e
            ))
        })?;

        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryUserRepository;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::ports::UserRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

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

    async fn repo_with(users: &[&str]) -> Arc<InMemoryUserRepository> {
        let repo = Arc::new(InMemoryUserRepository::new());
        for u in users {
            repo.save(&user(u)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn follow_records_edge_on_both_sides() {
        let repo = repo_with(&["alice", "bob"]).await;
        let handler = FollowUserHandler::new(repo.clone());

        let actor = handler
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();

        assert!(actor.is_following(&uid("bob")));
        let bob = repo.find_by_id(&uid("bob")).await.unwrap().unwrap();
        assert!(bob.followers().contains(&uid("alice")));
    }

    #[tokio::test]
    async fn follow_is_idempotent() {
        let repo = repo_with(&["alice", "bob"]).await;
        let handler = FollowUserHandler::new(repo.clone());
        let cmd = FollowUserCommand {
            actor_id: uid("alice"),
            target_id: uid("bob"),
        };

        handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();

        let bob = repo.find_by_id(&uid("bob")).await.unwrap().unwrap();
        assert_eq!(bob.followers().len(), 1);
        let alice = repo.find_by_id(&uid("alice")).await.unwrap().unwrap();
        assert_eq!(alice.following().len(), 1);
    }

    #[tokio::test]
    async fn follow_self_fails_and_mutates_nothing() {
        let repo = repo_with(&["alice"]).await;
        let handler = FollowUserHandler::new(repo.clone());

        let err = handler
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("alice"),
            })
            .await
            .unwrap_err();

        assert_eq!(err, UserError::SelfReference);
        let alice = repo.find_by_id(&uid("alice")).await.unwrap().unwrap();
        assert!(alice.following().is_empty());
        assert!(alice.followers().is_empty());
    }

    #[tokio::test]
    async fn follow_missing_target_fails_before_mutation() {
        let repo = repo_with(&["alice"]).await;
        let handler = FollowUserHandler::new(repo.clone());

        let err = handler
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("ghost"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NotFound(_)));
        let alice = repo.find_by_id(&uid("alice")).await.unwrap().unwrap();
        assert!(alice.following().is_empty());
    }

    #[tokio::test]
    async fn retry_repairs_half_committed_edge() {
        let repo = repo_with(&["alice", "bob"]).await;
        // Seed the state a partial failure leaves behind: the actor side
        // committed, the follower side did not.
        let mut alice = repo.find_by_id(&uid("alice")).await.unwrap().unwrap();
        alice.add_following(&uid("bob")).unwrap();
        repo.save(&alice).await.unwrap();

        let handler = FollowUserHandler::new(repo.clone());
        handler
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();

        let bob = repo.find_by_id(&uid("bob")).await.unwrap().unwrap();
        assert!(bob.followers().contains(&uid("alice")));
    }

    /// Repository that drops the target user after the actor-side write,
    /// forcing the second write to fail.
    struct SecondWriteFailingRepo {
        inner: Arc<InMemoryUserRepository>,
        victim: UserId,
        armed: AtomicBool,
    }

    #[async_trait]
    impl UserRepository for SecondWriteFailingRepo {
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
            if id == &self.victim && self.armed.load(Ordering::SeqCst) {
                return Err(DomainError::new(
                    ErrorCode::StorageError,
                    "Simulated outage",
                ));
            }
            self.inner.find_by_id(id).await
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            self.inner.find_by_email(email).await
        }

        async fn save(&self, user: &User) -> Result<(), DomainError> {
            let result = self.inner.save(user).await;
            // Arm the outage once the actor-side write has committed.
            if user.id() != &self.victim {
                self.armed.store(true, Ordering::SeqCst);
            }
            result
        }

        async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
            self.inner.delete(id).await
        }

        async fn find_all(&self) -> Result<Vec<User>, DomainError> {
            self.inner.find_all().await
        }
    }

    #[tokio::test]
    async fn second_write_failure_is_visible_and_retryable() {
        let inner = repo_with(&["alice", "bob"]).await;
        let repo = Arc::new(SecondWriteFailingRepo {
            inner: inner.clone(),
            victim: uid("bob"),
            armed: AtomicBool::new(false),
        });
        let handler = FollowUserHandler::new(repo);

        let err = handler
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::EdgeSyncFailed { .. }));

        // Partial failure is visible: actor side committed, follower side not.
        let alice = inner.find_by_id(&uid("alice")).await.unwrap().unwrap();
        let bob = inner.find_by_id(&uid("bob")).await.unwrap().unwrap();
        assert!(alice.is_following(&uid("bob")));
        assert!(bob.followers().is_empty());

        // Retrying against a healthy store converges to the symmetric state.
        let handler = FollowUserHandler::new(inner.clone());
        handler
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();
        let bob = inner.find_by_id(&uid("bob")).await.unwrap().unwrap();
        assert!(bob.followers().contains(&uid("alice")));
    }
}
