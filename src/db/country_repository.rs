// src/db/country_repository.rs
// DOCUMENTATION: Country database operations
// PURPOSE: Handle CRUD operations for countries

use crate::errors::CatalogError;
use crate::models::{Country, CreateCountryRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CountryRepository;

impl CountryRepository {
    /// Create a new country
    /// DOCUMENTATION: A duplicate name surfaces as AlreadyExists from the unique constraint
    pub async fn create(
        pool: &PgPool,
        req: &CreateCountryRequest,
    ) -> Result<Country, CatalogError> {
        let country = sqlx::query_as::<_, Country>(
            r#"
            INSERT INTO countries (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(&req.name)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create country {}: {}", req.name, e);
            CatalogError::from_sqlx("Create country", e)
        })?;

        log::info!("Created country {} ({})", country, country.id);
        Ok(country)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Country, CatalogError> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, created_at
            FROM countries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching country {}: {}", id, e);
            CatalogError::from_sqlx("Fetch country", e)
        })?
        .ok_or_else(|| {
            log::warn!("Country not found: {}", id);
            CatalogError::NotFound(format!("country {}", id))
        })
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Country>, CatalogError> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, created_at
            FROM countries
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list countries: {}", e);
            CatalogError::from_sqlx("List countries", e)
        })
    }

    /// Case-insensitive exact name match; earliest record wins if several match
    pub async fn find_by_name_iexact(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Country>, CatalogError> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, created_at
            FROM countries
            WHERE LOWER(name) = LOWER($1)
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to look up country '{}': {}", name, e);
            CatalogError::from_sqlx("Find country", e)
        })
    }

    /// Delete a country
    /// DOCUMENTATION: Cascades to its cities and to every photo tagged with
    /// the country or one of those cities
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), CatalogError> {
        let rows = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for country {}: {}", id, e);
                CatalogError::from_sqlx("Delete country", e)
            })?
            .rows_affected();

        if rows == 0 {
            return Err(CatalogError::NotFound(format!("country {}", id)));
        }

        log::info!("Deleted country: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CityRepository, PhotoRepository};
    use crate::models::{CreateCityRequest, Essence};
    use crate::test_support::{seed_city, seed_country, seed_item, seed_user};

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn duplicate_name_is_already_exists(pool: PgPool) {
        seed_country(&pool, "Russia").await;

        let err = CountryRepository::create(
            &pool,
            &CreateCountryRequest {
                name: "Russia".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CatalogError::AlreadyExists(_)));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn name_uniqueness_is_case_sensitive(pool: PgPool) {
        seed_country(&pool, "Georgia").await;

        let other = CountryRepository::create(
            &pool,
            &CreateCountryRequest {
                name: "GEORGIA".to_string(),
            },
        )
        .await;

        tokio_test::assert_ok!(other);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn find_by_name_ignores_case(pool: PgPool) {
        let russia = seed_country(&pool, "Russia").await;

        let found = CountryRepository::find_by_name_iexact(&pool, "rUSSIA")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, russia.id);

        let missing = CountryRepository::find_by_name_iexact(&pool, "Russ%")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn delete_cascades_to_cities_and_photos(pool: PgPool) {
        let russia = seed_country(&pool, "Russia").await;
        let moscow = seed_city(&pool, "Moscow", russia.id).await;
        let chair = seed_item(&pool, "Chair").await;
        let user = seed_user(&pool, "anna", false).await;

        let by_country =
            PhotoRepository::create(&pool, "media/photos/a.jpg", Essence::Country(russia.id), user.id)
                .await
                .unwrap();
        let by_city =
            PhotoRepository::create(&pool, "media/photos/b.jpg", Essence::City(moscow.id), user.id)
                .await
                .unwrap();
        let by_item =
            PhotoRepository::create(&pool, "media/photos/c.jpg", Essence::Item(chair.id), user.id)
                .await
                .unwrap();

        CountryRepository::delete(&pool, russia.id).await.unwrap();

        assert!(matches!(
            CityRepository::get_by_id(&pool, moscow.id).await,
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            PhotoRepository::get_by_id(&pool, by_country.id).await,
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            PhotoRepository::get_by_id(&pool, by_city.id).await,
            Err(CatalogError::NotFound(_))
        ));
        tokio_test::assert_ok!(PhotoRepository::get_by_id(&pool, by_item.id).await);

        // The country is gone, so a new city cannot reference it
        let orphan = CityRepository::create(
            &pool,
            &CreateCityRequest {
                name: "Kazan".to_string(),
                country_id: russia.id,
            },
        )
        .await;
        assert!(matches!(orphan, Err(CatalogError::NotFound(_))));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn delete_missing_country_is_not_found(pool: PgPool) {
        let err = CountryRepository::delete(&pool, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
