//! User aggregate entity.
//!
//! Users are created on first successful authentication. The follow graph is
//! denormalized: each edge appears in one user's `following` and the
//! counterparty's `followers`. The same pattern mirrors plan enrollment in
//! `enrolled_plans` against the plan's enrolled set.
//!
//! # Invariants
//!
//! - For users A, B: `B ∈ A.following ⇔ A ∈ B.followers` once both writes
//!   of a follow/unfollow have committed
//! - A user never appears in its own follower or following set
//!
//! All edge mutations here are convergent: reapplying the same mutation is a
//! no-op, so the application layer may retry freely.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Timestamp, UserId};

/// User aggregate - profile plus denormalized relationship edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable unique key from the identity provider.
    id: UserId,

    /// Email address, unique across users.
    email: String,

    /// Display name.
    name: Option<String>,

    /// Profile picture reference.
    picture_url: Option<String>,

    /// Users following this user.
    followers: BTreeSet<UserId>,

    /// Users this user follows.
    following: BTreeSet<UserId>,

    /// Plans this user is enrolled in.
    enrolled_plans: BTreeSet<PlanId>,

    /// When the user was first seen.
    created_at: Timestamp,

    /// When the user was last updated.
    updated_at: Timestamp,

    /// Store version for compare-and-swap saves.
    version: u64,
}

impl User {
    /// Creates a user on first authentication.
    pub fn new(id: UserId, email: impl Into<String>, name: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            email: email.into(),
            name,
            picture_url: None,
            followers: BTreeSet::new(),
            following: BTreeSet::new(),
            enrolled_plans: BTreeSet::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Reconstitute a user from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: String,
        name: Option<String>,
        picture_url: Option<String>,
        followers: BTreeSet<UserId>,
        following: BTreeSet<UserId>,
        enrolled_plans: BTreeSet<PlanId>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            email,
            name,
            picture_url,
            followers,
            following,
            enrolled_plans,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn picture_url(&self) -> Option<&str> {
        self.picture_url.as_deref()
    }

    pub fn followers(&self) -> &BTreeSet<UserId> {
        &self.followers
    }

    pub fn following(&self) -> &BTreeSet<UserId> {
        &self.following
    }

    pub fn enrolled_plans(&self) -> &BTreeSet<PlanId> {
        &self.enrolled_plans
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

    pub fn is_following(&self, other: &UserId) -> bool {
        self.following.contains(other)
    }

    pub fn is_enrolled_in(&self, plan_id: &PlanId) -> bool {
        self.enrolled_plans.contains(plan_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Profile mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Updates profile fields, skipping blank values.
    pub fn update_profile(&mut self, name: Option<String>, picture_url: Option<String>) {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.name = Some(name);
        }
        if let Some(url) = picture_url.filter(|u| !u.trim().is_empty()) {
            self.picture_url = Some(url);
        }
        self.updated_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Follow edge half-operations (convergent)
    // ─────────────────────────────────────────────────────────────────────────

    /// Records that this user follows `target`.
    ///
    /// Returns `true` when the edge was added, `false` when already present.
    ///
    /// # Errors
    ///
    /// - `SelfReference` if `target` is this user
    pub fn add_following(&mut self, target: &UserId) -> Result<bool, DomainError> {
        if target == &self.id {
            return Err(DomainError::new(
                ErrorCode::SelfReference,
                "Cannot follow yourself",
            ));
        }
        let changed = self.following.insert(target.clone());
        if changed {
            self.updated_at = Timestamp::now();
        }
        Ok(changed)
    }

    /// Removes `target` from this user's following set.
    pub fn remove_following(&mut self, target: &UserId) -> bool {
        let changed = self.following.remove(target);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    /// Records that `follower` follows this user.
    ///
    /// # Errors
    ///
    /// - `SelfReference` if `follower` is this user
    pub fn add_follower(&mut self, follower: &UserId) -> Result<bool, DomainError> {
        if follower == &self.id {
            return Err(DomainError::new(
                ErrorCode::SelfReference,
                "Cannot follow yourself",
            ));
        }
        let changed = self.followers.insert(follower.clone());
        if changed {
            self.updated_at = Timestamp::now();
        }
        Ok(changed)
    }

    /// Removes `follower` from this user's follower set.
    pub fn remove_follower(&mut self, follower: &UserId) -> bool {
        let changed = self.followers.remove(follower);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enrollment edge half-operations (convergent)
    // ─────────────────────────────────────────────────────────────────────────

    /// Records enrollment in a plan. Returns `true` when newly added.
    pub fn enroll_in(&mut self, plan_id: PlanId) -> bool {
        let changed = self.enrolled_plans.insert(plan_id);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    /// Removes enrollment in a plan. Returns `true` when the key was present.
    pub fn withdraw_from(&mut self, plan_id: &PlanId) -> bool {
        let changed = self.enrolled_plans.remove(plan_id);
        if changed {
            self.updated_at = Timestamp::now();
        }
        changed
    }
}
