//! In-memory repositories.
//!
//! Backed by `tokio::sync::RwLock<HashMap>` and used for tests and local
//! development. Saves are compare-and-swap on the aggregate version: the
//! stored copy carries the caller's version plus one, and a save whose
//! version does not match the stored one fails with `ConcurrencyConflict`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PlanId, UserId};
use crate::domain::plan::LearningPlan;
use crate::domain::user::User;
use crate::ports::{PlanRepository, UserRepository};

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if let Some(stored) = users.get(user.id()) {
            if stored.version() != user.version() {
                return Err(DomainError::conflict(format!(
                    "Stale save for user {}: stored version {}, caller version {}",
                    user.id(),
                    stored.version(),
                    user.version()
                )));
            }
        }
        let mut next = user.clone();
        next.bump_version();
        users.insert(user.id().clone(), next);
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users.write().await.remove(id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let mut all: Vec<User> = self.users.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }
}

/// In-memory plan repository.
#[derive(Default)]
pub struct InMemoryPlanRepository {
    plans: RwLock<HashMap<PlanId, LearningPlan>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<LearningPlan>
    where
        F: Fn(&LearningPlan) -> bool,
    {
        let mut matches: Vec<LearningPlan> = self
            .plans
            .read()
            .await
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at().cmp(b.created_at()).then(a.id().cmp(b.id())));
        matches
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<LearningPlan>, DomainError> {
        Ok(self.plans.read().await.get(id).cloned())
    }

    async fn save(&self, plan: &LearningPlan) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        if let Some(stored) = plans.get(plan.id()) {
            if stored.version() != plan.version() {
                return Err(DomainError::conflict(format!(
                    "Stale save for plan {}: stored version {}, caller version {}",
                    plan.id(),
                    stored.version(),
                    plan.version()
                )));
            }
        }
        let mut next = plan.clone();
        next.bump_version();
        plans.insert(*plan.id(), next);
        Ok(())
    }

    async fn delete(&self, id: &PlanId) -> Result<(), DomainError> {
        self.plans.write().await.remove(id);
        Ok(())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<LearningPlan>, DomainError> {
        Ok(self.filtered(|p| p.category() == Some(category)).await)
    }

    async fn find_by_creator(&self, creator_id: &UserId) -> Result<Vec<LearningPlan>, DomainError> {
        Ok(self.filtered(|p| p.creator_id() == creator_id).await)
    }

    async fn find_by_enrolled_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<LearningPlan>, DomainError> {
        Ok(self.filtered(|p| p.is_enrolled(user_id)).await)
    }

    async fn find_by_creators(
        &self,
        creator_ids: &[UserId],
    ) -> Result<Vec<LearningPlan>, DomainError> {
        Ok(self.filtered(|p| creator_ids.contains(p.creator_id())).await)
    }
}
