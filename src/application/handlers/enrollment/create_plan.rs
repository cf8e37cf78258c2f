//! CreatePlanHandler - Command handler for creating a learning plan.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PlanId, UserId};
use crate::domain::plan::{LearningPlan, PlanError, Topic};
use crate::ports::PlanRepository;

/// Incoming topic content, not yet an identified Topic.
#[derive(Debug, Clone)]
pub struct TopicDraft {
    pub title: String,
    pub description: Option<String>,
    pub resources: Vec<String>,
    pub completed: bool,
}

impl TopicDraft {
    pub(crate) fn into_topic(self) -> Result<Topic, PlanError> {
        let mut topic = Topic::new(self.title, self.description, self.resources)
            .map_err(DomainError::from)?;
        topic.set_completed(self.completed);
        Ok(topic)
    }
}

/// Command to create a plan owned by `creator_id`.
#[derive(Debug, Clone)]
pub struct CreatePlanCommand {
    pub creator_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub topics: Vec<TopicDraft>,
}

/// Handler for plan creation.
pub struct CreatePlanHandler {
    plans: Arc<dyn PlanRepository>,
}

impl CreatePlanHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    /// Creates and persists a new plan with a fresh identity.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the plan title or any topic title is blank
    pub async fn handle(&self, cmd: CreatePlanCommand) -> Result<LearningPlan, PlanError> {
        let topics = cmd
            .topics
            .into_iter()
            .map(TopicDraft::into_topic)
            .collect::<Result<Vec<_>, _>>()?;

        let mut plan = LearningPlan::new(
            PlanId::new(),
            cmd.creator_id,
            cmd.title,
            cmd.description,
            cmd.category,
            topics,
        )?;

        self.plans.save(&plan).await?;
        plan.bump_version();

        tracing::info!(plan_id = %plan.id(), creator = %plan.creator_id(), "plan created");
        Ok(plan)
    }
}
