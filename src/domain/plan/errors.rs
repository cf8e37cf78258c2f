//! Plan-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, TopicId};

/// Errors from plan, enrollment, and progress operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Plan was not found.
    NotFound(PlanId),
    /// Topic was not found within the plan. The id is `None` when the error
    /// surfaced through a conversion that does not carry it.
    TopicNotFound(Option<TopicId>),
    /// Actor lacks the required relation to the plan.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The second write of a two-aggregate operation could not be committed
    /// after retries. The first write's effect persists; the whole call is
    /// safe to retry and converges.
    EdgeSyncFailed { detail: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl PlanError {
    pub fn not_found(id: PlanId) -> Self {
        PlanError::NotFound(id)
    }
    pub fn topic_not_found(id: TopicId) -> Self {
        PlanError::TopicNotFound(Some(id))
    }
    pub fn forbidden() -> Self {
        PlanError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlanError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn edge_sync_failed(detail: impl Into<String>) -> Self {
        PlanError::EdgeSyncFailed {
            detail: detail.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        PlanError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanError::NotFound(_) => ErrorCode::PlanNotFound,
            PlanError::TopicNotFound(_) => ErrorCode::TopicNotFound,
            PlanError::Forbidden => ErrorCode::Forbidden,
            PlanError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PlanError::EdgeSyncFailed { .. } => ErrorCode::ConcurrencyConflict,
            PlanError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            PlanError::NotFound(id) => format!("Learning plan not found: {}", id),
            PlanError::TopicNotFound(Some(id)) => format!("Topic not found: {}", id),
            PlanError::TopicNotFound(None) => "Topic not found".to_string(),
            PlanError::Forbidden => "Permission denied".to_string(),
            PlanError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PlanError::EdgeSyncFailed { detail } => {
                format!("Edge synchronization failed: {}", detail)
            }
            PlanError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PlanError {}

impl From<DomainError> for PlanError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => PlanError::Forbidden,
            ErrorCode::TopicNotFound => PlanError::TopicNotFound(None),
            ErrorCode::ValidationFailed => PlanError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            ErrorCode::ConcurrencyConflict => PlanError::edge_sync_failed(err.to_string()),
            _ => PlanError::Infrastructure(err.to_string()),
        }
    }
}
