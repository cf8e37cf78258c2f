//! Session validator port - the identity resolver.
//!
//! Maps an inbound request token to an authenticated principal. The HTTP
//! middleware calls this once per request and hands the result to handlers,
//! so core operations receive their actor explicitly instead of reading an
//! ambient security context.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates request tokens and resolves the acting identity.
///
/// # Contract
///
/// Implementations must:
/// - Return the principal for a valid token
/// - Return `AuthError::InvalidToken` for missing/malformed/expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient provider errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a bearer token and return the authenticated principal.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_validator_is_object_safe() {
        fn _accepts_dyn(_v: &dyn SessionValidator) {}
        fn _assert_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_send_sync::<std::sync::Arc<dyn SessionValidator>>();
    }
}
