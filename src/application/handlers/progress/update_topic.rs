//! UpdateTopicHandler - Command handler for editing a topic in place.

use std::sync::Arc;

use crate::application::handlers::sync::save_plan_with_retry;
use crate::domain::foundation::{ErrorCode, PlanId, TopicId, UserId};
use crate::domain::plan::{LearningPlan, PlanError};
use crate::ports::PlanRepository;

/// Command to replace a topic's content and completion flag.
#[derive(Debug, Clone)]
pub struct UpdateTopicCommand {
    pub actor_id: UserId,
    pub plan_id: PlanId,
    pub topic_id: TopicId,
    pub title: String,
    pub description: Option<String>,
    pub resources: Vec<String>,
    pub completed: bool,
}

/// Handler for topic edits, creator-only.
pub struct UpdateTopicHandler {
    plans: Arc<dyn PlanRepository>,
}

impl UpdateTopicHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Replaces the topic's content, applies the completion flag, and
    /// recomputes plan progress.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    /// - `TopicNotFound` if the topic is not in the plan
    /// - `Forbidden` if the actor is not the creator
    /// - `ValidationFailed` if the new title is blank
    pub async fn handle(&self, cmd: UpdateTopicCommand) -> Result<LearningPlan, PlanError> {
        save_plan_with_retry(self.plans.as_ref(), &cmd.plan_id, |p| {
            p.authorize_creator(&cmd.actor_id)?;
            p.update_topic(
                &cmd.topic_id,
                cmd.title.clone(),
                cmd.description.clone(),
                cmd.resources.clone(),
                cmd.completed,
            )
        })
        .await
        .map_err(|e| match e.code {
            ErrorCode::PlanNotFound => PlanError::not_found(cmd.plan_id),
            ErrorCode::TopicNotFound => PlanError::topic_not_found(cmd.topic_id),
            _ => e.into(),
        })
    }
}
