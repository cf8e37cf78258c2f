//! User repository port (aggregate store, user kind).
//!
//! Key-addressed load/save/delete of User aggregates plus the simple
//! field-predicate queries the read side needs.
//!
//! # Concurrency
//!
//! `save` is a compare-and-swap on the aggregate's version: it fails with
//! `ConcurrencyConflict` when the stored version differs from the one the
//! caller loaded. Two-aggregate operations rely on this to reload and
//! reapply their convergent edge mutation instead of overwriting concurrent
//! edits last-write-wins.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by email. Returns `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Save a user (upsert, version-checked).
    ///
    /// On success the stored version is the aggregate's version plus one.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the stored version does not match
    /// - `StorageError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user by id. Deleting an absent user is a no-op.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// List all users (candidate projection input).
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
}
