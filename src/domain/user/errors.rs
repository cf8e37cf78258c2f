//! User-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors from user and relationship operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// User was not found.
    NotFound(UserId),
    /// Attempted to follow oneself.
    SelfReference,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The second write of a two-aggregate operation could not be committed
    /// after retries. The first write's effect persists; the whole call is
    /// safe to retry and converges.
    EdgeSyncFailed { detail: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn edge_sync_failed(detail: impl Into<String>) -> Self {
        UserError::EdgeSyncFailed {
            detail: detail.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::SelfReference => ErrorCode::SelfReference,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::EdgeSyncFailed { .. } => ErrorCode::ConcurrencyConflict,
            UserError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::SelfReference => "Cannot follow yourself".to_string(),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::EdgeSyncFailed { detail } => {
                format!("Edge synchronization failed: {}", detail)
            }
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SelfReference => UserError::SelfReference,
            ErrorCode::ValidationFailed => UserError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            ErrorCode::ConcurrencyConflict => UserError::edge_sync_failed(err.to_string()),
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_reference_maps_to_code() {
        assert_eq!(UserError::SelfReference.code(), ErrorCode::SelfReference);
    }

    #[test]
    fn domain_error_conversion_preserves_category() {
        let err: UserError = DomainError::new(ErrorCode::SelfReference, "nope").into();
        assert_eq!(err, UserError::SelfReference);

        let err: UserError = DomainError::conflict("stale").into();
        assert!(matches!(err, UserError::EdgeSyncFailed { .. }));
    }
}
