// src/models/country.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Top-level geographic entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Request to create a new country
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCountryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
