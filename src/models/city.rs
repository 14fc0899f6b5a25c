// src/models/city.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// City belonging to exactly one country
/// DOCUMENTATION: `country_name` is joined in by every repository query so the
/// city can be labelled without a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
    pub country_name: String,
    pub created_at: DateTime<Utc>,
}

/// Renders as "Moscow (Russia)"
impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.country_name)
    }
}

/// Request to create a new city
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCityRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub country_id: Uuid,
}

/// Query string for GET /cities
#[derive(Debug, Clone, Deserialize)]
pub struct CityFilter {
    pub country_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_label_includes_country() {
        let city = City {
            id: Uuid::new_v4(),
            name: "Moscow".to_string(),
            country_id: Uuid::new_v4(),
            country_name: "Russia".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(city.to_string(), "Moscow (Russia)");
    }

    #[test]
    fn test_create_city_validation() {
        let ok = CreateCityRequest {
            name: "Tbilisi".to_string(),
            country_id: Uuid::new_v4(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreateCityRequest {
            name: String::new(),
            country_id: Uuid::new_v4(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreateCityRequest {
            name: "x".repeat(101),
            country_id: Uuid::new_v4(),
        };
        assert!(too_long.validate().is_err());
    }
}
