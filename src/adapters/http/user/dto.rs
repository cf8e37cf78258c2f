//! HTTP DTOs for user endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to update the own profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub picture_url: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full user representation including relationship edges.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture_url: Option<String>,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub enrolled_plan_ids: Vec<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().map(String::from),
            picture_url: user.picture_url().map(String::from),
            followers: user.followers().iter().map(|u| u.to_string()).collect(),
            following: user.following().iter().map(|u| u.to_string()).collect(),
            enrolled_plan_ids: user
                .enrolled_plans()
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Compact user representation for listings.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture_url: Option<String>,
}

impl From<&User> for UserSummaryResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().map(String::from),
            picture_url: user.picture_url().map(String::from),
        }
    }
}
