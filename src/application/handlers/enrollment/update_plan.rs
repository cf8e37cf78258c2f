//! UpdatePlanHandler - Command handler for editing plan details.

use std::sync::Arc;

use crate::application::handlers::enrollment::TopicDraft;
use crate::application::handlers::sync::save_plan_with_retry;
use crate::domain::foundation::{ErrorCode, PlanId, UserId};
use crate::domain::plan::{LearningPlan, PlanError, Topic};
use crate::ports::PlanRepository;

/// Command to update a plan's details.
///
/// A `Some` topic list replaces the whole list with freshly identified
/// topics; `None` leaves the existing topics untouched.
#[derive(Debug, Clone)]
pub struct UpdatePlanCommand {
    pub actor_id: UserId,
    pub plan_id: PlanId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub topics: Option<Vec<TopicDraft>>,
}

/// Handler for plan edits, creator-only.
pub struct UpdatePlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl UpdatePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Applies the edit and recomputes progress when topics were replaced.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    /// - `Forbidden` if the actor is not the creator
    /// - `ValidationFailed` if the plan title or any topic title is blank
    pub async fn handle(&self, cmd: UpdatePlanCommand) -> Result<LearningPlan, PlanError> {
        let topics = cmd
            .topics
            .map(|drafts| {
                drafts
                    .into_iter()
                    .map(TopicDraft::into_topic)
                    .collect::<Result<Vec<Topic>, _>>()
            })
            .transpose()?;

        save_plan_with_retry(self.plans.as_ref(), &cmd.plan_id, |p| {
            p.authorize_creator(&cmd.actor_id)?;
            p.update_details(
                cmd.title.clone(),
                cmd.description.clone(),
                cmd.category.clone(),
                topics.clone(),
            )
        })
        .await
        .map_err(|e| match e.code {
            ErrorCode::PlanNotFound => PlanError::not_found(cmd.plan_id),
            _ => e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryPlanRepository;
    use crate::ports::PlanRepository;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seeded_plan(repo: &InMemoryPlanRepository) -> PlanId {
        let plan = LearningPlan::new(
            PlanId::new(),
            uid("creator"),
            "Rust Basics",
            None,
            Some("programming".to_string()),
            vec![],
        )
        .unwrap();
        let id = *plan.id();
        repo.save(&plan).await.unwrap();
        id
    }

    #[tokio::test]
    async fn update_replaces_details_and_topics() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let plan_id = seeded_plan(&repo).await;
        let handler = UpdatePlanHandler::new(repo.clone());

        let plan = handler
            .handle(UpdatePlanCommand {
                actor_id: uid("creator"),
                plan_id,
                title: "Rust Advanced".to_string(),
                description: Some("deep dive".to_string()),
                category: Some("programming".to_string()),
                topics: Some(vec![TopicDraft {
                    title: "Unsafe".to_string(),
                    description: None,
                    resources: vec![],
                    completed: true,
                }]),
            })
            .await
            .unwrap();

        assert_eq!(plan.title(), "Rust Advanced");
        assert_eq!(plan.progress().value(), 100.0);
        assert!(plan.is_completed());
    }

    #[tokio::test]
    async fn update_by_non_creator_is_forbidden() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let plan_id = seeded_plan(&repo).await;
        let handler = UpdatePlanHandler::new(repo.clone());

        let err = handler
            .handle(UpdatePlanCommand {
                actor_id: uid("intruder"),
                plan_id,
                title: "Hijacked".to_string(),
                description: None,
                category: None,
                topics: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::Forbidden);

        let stored = repo.find_by_id(&plan_id).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Rust Basics");
    }

    #[tokio::test]
    async fn update_missing_plan_is_not_found() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let handler = UpdatePlanHandler::new(repo);

        let err = handler
            .handle(UpdatePlanCommand {
                actor_id: uid("creator"),
                plan_id: PlanId::new(),
                title: "Anything".to_string(),
                description: None,
                category: None,
                topics: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::NotFound(_)));
    }
}
