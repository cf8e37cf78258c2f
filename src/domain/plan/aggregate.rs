//! LearningPlan aggregate entity.
//!
//! The plan owns its topic list and carries the plan-side half of the
//! enrollment edge. Progress is denormalized from topic state and recomputed
//! on every completion toggle and topic removal.
//!
//! # Invariants
//!
//! - `title` is non-empty
//! - For plan P and user U: `U ∈ P.enrolled_user_ids ⇔ P.id ∈
//!   U.enrolled_plans` once both writes have committed
//! - `progress == 100 * completed_topics / total_topics` for a non-empty
//!   topic list, 0 for an empty one
//! - `completed` is true iff the topic list is non-empty and every topic is
//!   completed; its completion date follows the same stamp-once/clear rule
//!   as topics

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, PlanId, Progress, Timestamp, TopicId, UserId, ValidationError,
};

use super::Topic;

/// Learning plan aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
    /// Unique identifier for this plan.
    id: PlanId,

    /// Plan title.
    title: String,

    /// Optional description.
    description: Option<String>,

    /// Category label used for discovery queries.
    category: Option<String>,

    /// User who created the plan. Only the creator may mutate plan content.
    creator_id: UserId,

    /// Users enrolled in this plan (plan-side half of the enrollment edge).
    enrolled_user_ids: BTreeSet<UserId>,

    /// Ordered topic list, exclusively owned by the plan.
    topics: Vec<Topic>,

    /// Denormalized completion percentage.
    progress: Progress,

    /// Whether every topic is completed (and the list is non-empty).
    completed: bool,

    /// When the plan first became fully completed.
    completion_date: Option<Timestamp>,

    /// When the plan was created.
    created_at: Timestamp,

    /// When the plan was last updated.
    updated_at: Timestamp,

    /// Store version for compare-and-swap saves.
    version: u64,
}

impl LearningPlan {
    /// Creates a new plan owned by `creator_id`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is blank
    pub fn new(
        id: PlanId,
        creator_id: UserId,
        title: impl Into<String>,
        description: Option<String>,
        category: Option<String>,
        topics: Vec<Topic>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        Self::validate_title(&title)?;

        let now = Timestamp::now();
        let mut plan = Self {
            id,
            title,
            description,
            category,
            creator_id,
            enrolled_user_ids: BTreeSet::new(),
            topics,
            progress: Progress::ZERO,
            completed: false,
            completion_date: None,
            created_at: now,
            updated_at: now,
            version: 0,
        };
        plan.recompute_progress();
        Ok(plan)
    }

    /// Reconstitute a plan from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PlanId,
        title: String,
        description: Option<String>,
        category: Option<String>,
        creator_id: UserId,
        enrolled_user_ids: BTreeSet<UserId>,
        topics: Vec<Topic>,
        progress: Progress,
        completed: bool,
        completion_date: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            title,
            description,
            category,
            creator_id,
            enrolled_user_ids,
            topics,
            progress,
            completed,
            completion_date,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    pub fn enrolled_user_ids(&self) -> &BTreeSet<UserId> {
        &self.enrolled_user_ids
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, topic_id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id() == topic_id)
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completion_date(&self) -> Option<&Timestamp> {
        self.completion_date.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Store version used by compare-and-swap saves.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Advances the store version. Called by repositories on successful save.
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user created this plan.
    pub fn is_creator(&self, user_id: &UserId) -> bool {
        &self.creator_id == user_id
    }

    /// Checks if the given user is enrolled.
    pub fn is_enrolled(&self, user_id: &UserId) -> bool {
        self.enrolled_user_ids.contains(user_id)
    }

    /// Validates that the user may mutate plan content.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not the creator
    pub fn authorize_creator(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_creator(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the plan creator may modify this plan",
            ))
        }
    }

    /// Validates that the user may record topic progress.
    ///
    /// The creator and enrolled users both qualify.
    ///
    /// # Errors
    ///
    /// - `Forbidden` otherwise
    pub fn authorize_progress(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_creator(user_id) || self.is_enrolled(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Must be enrolled in the plan to record progress",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enrollment edge half-operations (convergent)
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a user to the plan's enrolled set. Returns `true` when newly added.
    pub fn add_enrollment(&mut self, user_id: UserId) -> bool {
        let changed = self.enrolled_user_ids.insert(user_id);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    /// Removes a user from the enrolled set. Returns `true` when present.
    pub fn remove_enrollment(&mut self, user_id: &UserId) -> bool {
        let changed = self.enrolled_user_ids.remove(user_id);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content mutations (creator-gated at the application layer)
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces title, category, and optionally the whole topic list.
    ///
    /// A replaced topic list is revalidated and progress recomputed.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new title is blank
    pub fn update_details(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        category: Option<String>,
        topics: Option<Vec<Topic>>,
    ) -> Result<(), DomainError> {
        let title = title.into();
        Self::validate_title(&title)?;

        self.title = title;
        self.description = description;
        self.category = category;
        if let Some(topics) = topics {
            self.topics = topics;
            self.recompute_progress();
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Appends a topic.
    ///
    /// Progress is deliberately not recomputed: the new topic is uncompleted,
    /// so the stored percentage stays as-is until the next completion toggle
    /// or removal.
    pub fn add_topic(&mut self, topic: Topic) -> TopicId {
        let id = *topic.id();
        self.topics.push(topic);
        self.updated_at = Timestamp::now();
        id
    }

    /// Removes a topic by identity and recomputes progress over the
    /// remaining topics.
    ///
    /// # Errors
    ///
    /// - `TopicNotFound` if no topic carries the identity
    pub fn remove_topic(&mut self, topic_id: &TopicId) -> Result<(), DomainError> {
        let before = self.topics.len();
        self.topics.retain(|t| t.id() != topic_id);
        if self.topics.len() == before {
            return Err(DomainError::new(
                ErrorCode::TopicNotFound,
                format!("Topic not found: {}", topic_id),
            ));
        }
        self.recompute_progress();
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Sets a topic's completion flag and recomputes plan progress.
    ///
    /// # Errors
    ///
    /// - `TopicNotFound` if no topic carries the identity
    pub fn set_topic_completion(
        &mut self,
        topic_id: &TopicId,
        completed: bool,
    ) -> Result<(), DomainError> {
        let topic = self.topic_mut(topic_id)?;
        topic.set_completed(completed);
        self.recompute_progress();
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replaces a topic's content and completion flag, then recomputes.
    ///
    /// # Errors
    ///
    /// - `TopicNotFound` if no topic carries the identity
    /// - `ValidationFailed` if the new title is blank
    pub fn update_topic(
        &mut self,
        topic_id: &TopicId,
        title: impl Into<String>,
        description: Option<String>,
        resources: Vec<String>,
        completed: bool,
    ) -> Result<(), DomainError> {
        let topic = self.topic_mut(topic_id)?;
        topic.update_content(title, description, resources)?;
        topic.set_completed(completed);
        self.recompute_progress();
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn topic_mut(&mut self, topic_id: &TopicId) -> Result<&mut Topic, DomainError> {
        self.topics
            .iter_mut()
            .find(|t| t.id() == topic_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TopicNotFound,
                    format!("Topic not found: {}", topic_id),
                )
            })
    }

    /// Recomputes `progress`, `completed`, and the plan completion date from
    /// the current topic list.
    ///
    /// An empty list reports zero progress and an incomplete plan.
    fn recompute_progress(&mut self) {
        let total = self.topics.len();
        let done = self.topics.iter().filter(|t| t.is_completed()).count();

        self.progress = Progress::from_counts(done, total);
        let completed = total > 0 && done == total;

        self.completed = completed;
        if completed {
            if self.completion_date.is_none() {
                self.completion_date = Some(Timestamp::now());
            }
        } else {
            self.completion_date = None;
        }
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        Ok(())
    }
}
