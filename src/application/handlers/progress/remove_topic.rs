//! RemoveTopicHandler - Command handler for removing a topic from a plan.

use std::sync::Arc;

use crate::application::handlers::sync::save_plan_with_retry;
use crate::domain::foundation::{ErrorCode, PlanId, TopicId, UserId};
use crate::domain::plan::{LearningPlan, PlanError};
use crate::ports::PlanRepository;

/// Command to remove a topic from a plan.
#[derive(Debug, Clone)]
pub struct RemoveTopicCommand {
    pub actor_id: UserId,
    pub plan_id: PlanId,
    pub topic_id: TopicId,
}

/// Handler for topic removal, creator-only.
pub struct RemoveTopicHandler {
    plans: Arc<dyn PlanRepository>,
}

impl RemoveTopicHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Removes the topic and recomputes progress over the remaining set.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    /// - `TopicNotFound` if the topic is not in the plan
    /// - `Forbidden` if the actor is not the creator
    pub async fn handle(&self, cmd: RemoveTopicCommand) -> Result<LearningPlan, PlanError> {
        save_plan_with_retry(self.plans.as_ref(), &cmd.plan_id, |p| {
            p.authorize_creator(&cmd.actor_id)?;
            p.remove_topic(&cmd.topic_id)
        })
        .await
        .map_err(|e| match e.code {
            ErrorCode::PlanNotFound => PlanError::not_found(cmd.plan_id),
            ErrorCode::TopicNotFound => PlanError::topic_not_found(cmd.topic_id),
            _ => e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryPlanRepository;
    use crate::domain::plan::Topic;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seeded(repo: &InMemoryPlanRepository) -> (PlanId, TopicId, TopicId) {
        let topics = vec![
            Topic::new("T1", None, vec![]).unwrap(),
            Topic::new("T2", None, vec![]).unwrap(),
        ];
        let t1 = *topics[0].id();
        let t2 = *topics[1].id();
        let mut plan = LearningPlan::new(
            PlanId::new(),
            uid("creator"),
            "Rust Basics",
            None,
            None,
            topics,
        )
        .unwrap();
        plan.set_topic_completion(&t1, true).unwrap();
        let id = *plan.id();
        repo.save(&plan).await.unwrap();
        (id, t1, t2)
    }

    #[tokio::test]
    async fn remove_recomputes_over_remaining_topics() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let (plan_id, _, t2) = seeded(&repo).await;
        let handler = RemoveTopicHandler::new(repo);

        let plan = handler
            .handle(RemoveTopicCommand {
                actor_id: uid("creator"),
                plan_id,
                topic_id: t2,
            })
            .await
            .unwrap();

        assert_eq!(plan.topics().len(), 1);
        assert_eq!(plan.progress().value(), 100.0);
        assert!(plan.is_completed());
    }

    #[tokio::test]
    async fn remove_by_non_creator_is_forbidden() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let (plan_id, t1, _) = seeded(&repo).await;
        let handler = RemoveTopicHandler::new(repo);

        let err = handler
            .handle(RemoveTopicCommand {
                actor_id: uid("stranger"),
                plan_id,
                topic_id: t1,
            })
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::Forbidden);
    }

    #[tokio::test]
    async fn remove_unknown_topic_reports_its_identity() {
        let repo = Arc::new(InMemoryPlanRepository::new());
        let (plan_id, _, _) = seeded(&repo).await;
        let handler = RemoveTopicHandler::new(repo);
        let ghost = TopicId::new();

        let err = handler
            .handle(RemoveTopicCommand {
                actor_id: uid("creator"),
                plan_id,
                topic_id: ghost,
            })
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::topic_not_found(ghost));
    }
}
