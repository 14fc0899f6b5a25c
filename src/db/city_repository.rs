// src/db/city_repository.rs
// DOCUMENTATION: City database operations
// PURPOSE: Handle CRUD operations for cities, always joined with their country's name

use crate::errors::CatalogError;
use crate::models::{City, CreateCityRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// Shared projection; expects the city row aliased as `ci`
const CITY_SELECT: &str = r#"
    SELECT ci.id, ci.name, ci.country_id, co.name AS country_name, ci.created_at
"#;

pub struct CityRepository;

impl CityRepository {
    /// Create a new city
    /// DOCUMENTATION: Unknown country_id surfaces as NotFound through the
    /// foreign key; duplicate name as AlreadyExists
    pub async fn create(pool: &PgPool, req: &CreateCityRequest) -> Result<City, CatalogError> {
        let sql = format!(
            r#"
            WITH ci AS (
                INSERT INTO cities (name, country_id)
                VALUES ($1, $2)
                RETURNING *
            )
            {}
            FROM ci
            JOIN countries co ON co.id = ci.country_id
            "#,
            CITY_SELECT
        );

        let city = sqlx::query_as::<_, City>(&sql)
            .bind(&req.name)
            .bind(req.country_id)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to create city {}: {}", req.name, e);
                CatalogError::from_sqlx("Create city", e)
            })?;

        log::info!("Created city {} ({})", city, city.id);
        Ok(city)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<City, CatalogError> {
        let sql = format!(
            r#"
            {}
            FROM cities ci
            JOIN countries co ON co.id = ci.country_id
            WHERE ci.id = $1
            "#,
            CITY_SELECT
        );

        sqlx::query_as::<_, City>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching city {}: {}", id, e);
                CatalogError::from_sqlx("Fetch city", e)
            })?
            .ok_or_else(|| {
                log::warn!("City not found: {}", id);
                CatalogError::NotFound(format!("city {}", id))
            })
    }

    /// List cities, optionally only those of one country
    pub async fn list(
        pool: &PgPool,
        country_id: Option<Uuid>,
    ) -> Result<Vec<City>, CatalogError> {
        let sql = format!(
            r#"
            {}
            FROM cities ci
            JOIN countries co ON co.id = ci.country_id
            WHERE ($1::uuid IS NULL OR ci.country_id = $1)
            ORDER BY ci.name ASC
            "#,
            CITY_SELECT
        );

        sqlx::query_as::<_, City>(&sql)
            .bind(country_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list cities: {}", e);
                CatalogError::from_sqlx("List cities", e)
            })
    }

    /// Case-insensitive exact name match; earliest record wins if several match
    pub async fn find_by_name_iexact(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<City>, CatalogError> {
        let sql = format!(
            r#"
            {}
            FROM cities ci
            JOIN countries co ON co.id = ci.country_id
            WHERE LOWER(ci.name) = LOWER($1)
            ORDER BY ci.created_at ASC, ci.id ASC
            LIMIT 1
            "#,
            CITY_SELECT
        );

        sqlx::query_as::<_, City>(&sql)
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to look up city '{}': {}", name, e);
                CatalogError::from_sqlx("Find city", e)
            })
    }

    /// Delete a city and, through the cascade, every photo tagged with it
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), CatalogError> {
        let rows = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for city {}: {}", id, e);
                CatalogError::from_sqlx("Delete city", e)
            })?
            .rows_affected();

        if rows == 0 {
            return Err(CatalogError::NotFound(format!("city {}", id)));
        }

        log::info!("Deleted city: {}", id);
        Ok(())
    }
}
