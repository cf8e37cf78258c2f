//! SetTopicCompletionHandler - Command handler for toggling topic completion.

use std::sync::Arc;

use crate::application::handlers::sync::save_plan_with_retry;
use crate::domain::foundation::{ErrorCode, PlanId, TopicId, UserId};
use crate::domain::plan::{LearningPlan, PlanError};
use crate::ports::PlanRepository;

/// Command to mark a topic completed or not.
#[derive(Debug, Clone)]
pub struct SetTopicCompletionCommand {
    pub actor_id: UserId,
    pub plan_id: PlanId,
    pub topic_id: TopicId,
    pub completed: bool,
}

/// Handler for the completion toggle.
pub struct SetTopicCompletionHandler {
    plans: Arc<dyn PlanRepository>,
}

impl SetTopicCompletionHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Toggles the topic flag and rolls plan progress up from topic state.
    ///
    /// Setting a flag to its current value is a no-op that still succeeds.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not resolve
    /// - `TopicNotFound` if the topic is not in the plan
    /// - `Forbidden` if the actor is neither creator nor enrolled
    pub async fn handle(&self, cmd: SetTopicCompletionCommand) -> Result<LearningPlan, PlanError> {
        save_plan_with_retry(self.plans.as_ref(), &cmd.plan_id, |p| {
            p.authorize_progress(&cmd.actor_id)?;
            p.set_topic_completion(&cmd.topic_id, cmd.completed)
        })
        .await
        .map_err(|e| match e.code {
            ErrorCode::PlanNotFound => PlanError::not_found(cmd.plan_id),
            ErrorCode::TopicNotFound => PlanError::topic_not_found(cmd.topic_id),
            _ => e.into(),
        })
    }
}
