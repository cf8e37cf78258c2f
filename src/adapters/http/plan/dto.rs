//! HTTP DTOs for learning plan endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::enrollment::TopicDraft;
use crate::domain::plan::{LearningPlan, Topic};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Topic content in plan create/update payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

impl From<TopicRequest> for TopicDraft {
    fn from(req: TopicRequest) -> Self {
        TopicDraft {
            title: req.title,
            description: req.description,
            resources: req.resources,
            completed: req.completed,
        }
    }
}

/// Request to create a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub topics: Vec<TopicRequest>,
}

/// Request to update plan details. A present topic list replaces the whole
/// list; an absent one leaves existing topics untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlanRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub topics: Option<Vec<TopicRequest>>,
}

/// Request to append a topic.
#[derive(Debug, Clone, Deserialize)]
pub struct AddTopicRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Request to replace a topic's content.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTopicRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    pub completed: bool,
}

/// Request to toggle topic completion.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCompletionRequest {
    pub completed: bool,
}

/// Discovery filter on the plan collection.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanListParams {
    pub category: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Topic representation.
#[derive(Debug, Clone, Serialize)]
pub struct TopicResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub resources: Vec<String>,
    pub completed: bool,
    pub completion_date: Option<String>,
}

impl From<&Topic> for TopicResponse {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id().to_string(),
            title: topic.title().to_string(),
            description: topic.description().map(String::from),
            resources: topic.resources().to_vec(),
            completed: topic.is_completed(),
            completion_date: topic.completion_date().map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

/// Full plan representation including topics and the roll-up.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub creator_id: String,
    pub enrolled_user_ids: Vec<String>,
    pub topics: Vec<TopicResponse>,
    pub progress: f64,
    pub completed: bool,
    pub completion_date: Option<String>,
}

impl From<&LearningPlan> for PlanResponse {
    fn from(plan: &LearningPlan) -> Self {
        Self {
            id: plan.id().to_string(),
            title: plan.title().to_string(),
            description: plan.description().map(String::from),
            category: plan.category().map(String::from),
            creator_id: plan.creator_id().to_string(),
            enrolled_user_ids: plan
                .enrolled_user_ids()
                .iter()
                .map(|u| u.to_string())
                .collect(),
            topics: plan.topics().iter().map(TopicResponse::from).collect(),
            progress: plan.progress().value(),
            completed: plan.is_completed(),
            completion_date: plan.completion_date().map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}
