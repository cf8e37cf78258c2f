//! AddTopicHandler - Command handler for appending a topic to a plan.

use std::sync::Arc;

use crate::application::handlers::sync::save_plan_with_retry;
use crate::domain::foundation::{DomainError, ErrorCode, PlanId, TopicId, UserId};
use crate::domain::plan::{LearningPlan, PlanError, Topic};
use crate::ports::PlanRepository;

/// Command to append a new topic to a plan.
#[derive(Debug, Clone)]
pub struct AddTopicCommand {
    pub actor_id: UserId,
    pub plan_id: PlanId,
    pub title: String,
    pub description: Option<String>,
    pub resources: Vec<String>,
}

/// Handler for topic creation, creator-only.
pub struct AddTopicHandler {
    plans: Arc<dyn PlanRepository>,
}

impl AddTopicHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Appends the topic. The stored percentage is left as-is until the next
    /// completion toggle or removal.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    /// - `Forbidden` if the actor is not the creator
    /// - `ValidationFailed` if the title is blank
    pub async fn handle(
        &self,
        cmd: AddTopicCommand,
    ) -> Result<(LearningPlan, TopicId), PlanError> {
        let topic =
            Topic::new(cmd.title, cmd.description, cmd.resources).map_err(DomainError::from)?;
        let topic_id = *topic.id();

        let plan = save_plan_with_retry(self.plans.as_ref(), &cmd.plan_id, |p| {
            p.authorize_creator(&cmd.actor_id)?;
            if p.topic(&topic_id).is_none() {
                p.add_topic(topic.clone());
            }
            Ok(())
        })
        .await
        .map_err(|e| match e.code {
            ErrorCode::PlanNotFound => PlanError::not_found(cmd.plan_id),
            _ => e.into(),
        })?;

        Ok((plan, topic_id))
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

    async fn seeded(repo: &InMemoryPlanRepository) -> (PlanId, TopicId) {
        let topic = Topic::new("T1", None, vec![]).unwrap();
        let t1 = *topic.id();
        let mut plan = LearningPlan::new(
            PlanId::new(),
            uid("creator"),
            "Rust Basics",
            None,
            None,
            vec![topic],
        )
        .unwrap();
        plan.set_topic_completion(&t1, true).unwrap();
        let id = *plan.id();
        repo.save(&plan).await.unwrap();
        (id, t1)
    }

    #[tokio::test]
    async fn add_appends_topic_without_touching_progress() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let (plan_id, _) = seeded(&repo).await;
        let handler = AddTopicHandler::new(repo);

        let (plan, topic_id) = handler
            .handle(AddTopicCommand {
                actor_id: uid("creator"),
                plan_id,
                title: "T2".to_string(),
                description: None,
                resources: vec!["https://doc.rust-lang.org".to_string()],
            })
            .await
            .unwrap();

        assert!(plan.topic(&topic_id).is_some());
        assert_eq!(plan.topics().len(), 2);
        // Denominator grew but the stored percentage is stale until the next
        // toggle or removal.
        assert_eq!(plan.progress().value(), 100.0);
    }

    #[tokio::test]
    async fn add_by_non_creator_is_forbidden() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let (plan_id, _) = seeded(&repo).await;
        let handler = AddTopicHandler::new(repo.clone());

        let err = handler
            .handle(AddTopicCommand {
                actor_id: uid("stranger"),
                plan_id,
                title: "T2".to_string(),
                description: None,
                resources: vec![],
            })
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::Forbidden);
        assert_eq!(
            repo.find_by_id(&plan_id)
                .await
                .unwrap()
                .unwrap()
                .topics()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn add_rejects_blank_title() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let (plan_id, _) = seeded(&repo).await;
        let handler = AddTopicHandler::new(repo);

        let err = handler
            .handle(AddTopicCommand {
                actor_id: uid("creator"),
                plan_id,
                title: " ".to_string(),
                description: None,
                resources: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::ValidationFailed { .. }));
    }
}
