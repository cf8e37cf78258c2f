//! Topic entity, embedded in a learning plan.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, TopicId, ValidationError};

/// A unit of study within a learning plan.
///
/// # Invariants
///
/// - `id` is assigned once and never changes
/// - `title` is non-empty
/// - `completion_date` is set exactly when `completed` first becomes true
///   and cleared whenever `completed` is set false
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    id: TopicId,
    title: String,
    description: Option<String>,
    resources: Vec<String>,
    completed: bool,
    completion_date: Option<Timestamp>,
}

impl Topic {
    /// Creates a new uncompleted topic with a fresh identity.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        resources: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        Self::validate_title(&title)?;
        Ok(Self {
            id: TopicId::new(),
            title,
            description,
            resources,
            completed: false,
            completion_date: None,
        })
    }

    /// Reconstitute a topic from persistence (no validation).
    pub fn reconstitute(
        id: TopicId,
        title: String,
        description: Option<String>,
        resources: Vec<String>,
        completed: bool,
        completion_date: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            resources,
            completed,
            completion_date,
        }
    }

    pub fn id(&self) -> &TopicId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completion_date(&self) -> Option<&Timestamp> {
        self.completion_date.as_ref()
    }

    /// Sets the completion flag with completion-date bookkeeping.
    ///
    /// The date is stamped only on the first transition to completed and
    /// cleared whenever the topic is marked incomplete, so toggling back and
    /// forth never backdates completion.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        if completed {
            if self.completion_date.is_none() {
                self.completion_date = Some(Timestamp::now());
            }
        } else {
            self.completion_date = None;
        }
    }

    /// Replaces the topic's content fields. The identity is untouched.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the new title is blank
    pub fn update_content(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        resources: Vec<String>,
    ) -> Result<(), ValidationError> {
        let title = title.into();
        Self::validate_title(&title)?;
        self.title = title;
        self.description = description;
        self.resources = resources;
        Ok(())
    }

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(())
    }
}
