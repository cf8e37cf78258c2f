//! PlanQueries - read side of the plan store.
//!
//! Thin pass-throughs over the repository's field-predicate queries, plus
//! the followed-creators feed which joins the actor's following set against
//! plan ownership.

use std::sync::Arc;

use crate::domain::foundation::{PlanId, UserId};
use crate::domain::plan::{LearningPlan, PlanError};
use crate::ports::{PlanRepository, UserRepository};

/// Read-side queries over plans.
pub struct PlanQueries {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl PlanQueries {
    pub fn new(users: Arc<dyn UserRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { users, plans }
    }

    /// Single plan by identity.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    pub async fn get_plan(&self, plan_id: &PlanId) -> Result<LearningPlan, PlanError> {
        self.plans
            .find_by_id(plan_id)
            .await?
            .ok_or(PlanError::NotFound(*plan_id))
    }

    /// Plans created by the given user.
    pub async fn list_by_creator(&self, creator_id: &UserId) -> Result<Vec<LearningPlan>, PlanError> {
        Ok(self.plans.find_by_creator(creator_id).await?)
    }

    /// Plans the given user is enrolled in, resolved from the plan side of
    /// the edge so dangling user-side keys never surface.
    pub async fn list_enrolled(&self, user_id: &UserId) -> Result<Vec<LearningPlan>, PlanError> {
        Ok(self.plans.find_by_enrolled_user(user_id).await?)
    }

    /// Plans carrying the given category label.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<LearningPlan>, PlanError> {
        Ok(self.plans.find_by_category(category).await?)
    }

    /// Plans created by anyone the actor follows.
    ///
    /// # Errors
    ///
    /// - `Infrastructure` if the actor does not resolve
    pub async fn followed_creators_feed(
        &self,
        actor_id: &UserId,
    ) -> Result<Vec<LearningPlan>, PlanError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| PlanError::infrastructure(format!("User not found: {}", actor_id)))?;

        let creators: Vec<UserId> = actor.following().iter().cloned().collect();
        if creators.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.plans.find_by_creators(&creators).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::{InMemoryPlanRepository, InMemoryUserRepository};
    use crate::application::handlers::relationship::{FollowUserCommand, FollowUserHandler};
    use crate::domain::user::User;
    use crate::ports::{PlanRepository, UserRepository};

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn plan(repo: &InMemoryPlanRepository, creator: &str, category: &str) -> PlanId {
        let plan = LearningPlan::new(
            PlanId::new(),
            uid(creator),
            format!("{}'s plan", creator),
            None,
            Some(category.to_string()),
            vec![],
        )
        .unwrap();
        let id = *plan.id();
        repo.save(&plan).await.unwrap();
        id
    }

    #[tokio::test]
    async fn category_and_creator_queries_filter() {
        let users = Arc::new(InMemoryUserRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::new());
        plan(&plans, "alice", "rust").await;
        plan(&plans, "alice", "go").await;
        plan(&plans, "bob", "rust").await;

        let queries = PlanQueries::new(users, plans);
        assert_eq!(queries.list_by_category("rust").await.unwrap().len(), 2);
        assert_eq!(queries.list_by_creator(&uid("alice")).await.unwrap().len(), 2);
        assert!(queries.list_by_category("cooking").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn feed_covers_followed_creators_only() {
        let users = Arc::new(InMemoryUserRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::new());
        for id in ["alice", "bob", "carol"] {
            users
                .save(&User::new(uid(id), format!("{}@example.com", id), None))
                .await
                .unwrap();
        }
        plan(&plans, "bob", "rust").await;
        plan(&plans, "carol", "go").await;

        FollowUserHandler::new(users.clone())
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();

        let queries = PlanQueries::new(users, plans);
        let feed = queries.followed_creators_feed(&uid("alice")).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].creator_id(), &uid("bob"));
    }

    #[tokio::test]
    async fn feed_is_empty_without_followed_creators() {
        let users = Arc::new(InMemoryUserRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::new());
        users
            .save(&User::new(uid("alice"), "alice@example.com", None))
            .await
            .unwrap();

        let queries = PlanQueries::new(users, plans);
        assert!(queries
            .followed_creators_feed(&uid("alice"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn get_plan_missing_is_not_found() {
        let users = Arc::new(InMemoryUserRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::new());
        let queries = PlanQueries::new(users, plans);

        let err = queries.get_plan(&PlanId::new()).await.unwrap_err();
        assert!(matches!(err, PlanError::NotFound(_)));
    }
}
