//! Plan repository port (aggregate store, plan kind).
//!
//! Same compare-and-swap save discipline as the user repository, plus the
//! field-predicate queries used for discovery: by category, by creator, by
//! enrolled-user containment, and by creator-set membership (followed
//! creators' plans).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId, UserId};
use crate::domain::plan::LearningPlan;

/// Repository port for LearningPlan aggregate persistence.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Find a plan by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<LearningPlan>, DomainError>;

    /// Save a plan (upsert, version-checked).
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the stored version does not match
    /// - `StorageError` on persistence failure
    async fn save(&self, plan: &LearningPlan) -> Result<(), DomainError>;

    /// Delete a plan by id. Deleting an absent plan is a no-op.
    async fn delete(&self, id: &PlanId) -> Result<(), DomainError>;

    /// Plans with the given category label.
    async fn find_by_category(&self, category: &str) -> Result<Vec<LearningPlan>, DomainError>;

    /// Plans created by the given user.
    async fn find_by_creator(&self, creator_id: &UserId) -> Result<Vec<LearningPlan>, DomainError>;

    /// Plans whose enrolled set contains the given user.
    async fn find_by_enrolled_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<LearningPlan>, DomainError>;

    /// Plans created by any of the given users (feed of followed creators).
    async fn find_by_creators(
        &self,
        creator_ids: &[UserId],
    ) -> Result<Vec<LearningPlan>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PlanRepository) {}
    }
}
