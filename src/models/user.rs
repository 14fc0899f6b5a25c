// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Photo owner; moderators may approve photos and curate the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub moderator: bool,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Request to create a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Only honoured when the caller is allowed to moderate
    #[serde(default)]
    pub moderator: bool,
}

/// Body for PUT /users/{id}/moderator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetModeratorRequest {
    pub moderator: bool,
}
