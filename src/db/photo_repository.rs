// src/db/photo_repository.rs
// DOCUMENTATION: Photo database operations
// PURPOSE: Photo CRUD plus the approval and essence-based queries

use crate::db::{CityRepository, CountryRepository, ItemRepository};
use crate::errors::CatalogError;
use crate::models::{Essence, EssenceKind, Photo, PhotoRow};
use sqlx::PgPool;
use uuid::Uuid;

/// Photo columns plus the essence name; expects the photo row aliased as `p`
const PHOTO_SELECT: &str = r#"
    SELECT
        p.id, p.photo, p.approved, p.basic_key,
        p.item_id, p.city_id, p.country_id,
        p.user_id, p.created_at,
        COALESCE(i.name, ci.name, co.name) AS essence_name
"#;

const PHOTO_JOINS: &str = r#"
    LEFT JOIN items i ON i.id = p.item_id
    LEFT JOIN cities ci ON ci.id = p.city_id
    LEFT JOIN countries co ON co.id = p.country_id
"#;

const PHOTO_ORDER: &str = "ORDER BY p.created_at ASC, p.id ASC";

pub struct PhotoRepository;

impl PhotoRepository {
    /// Create a new photo, unapproved
    /// DOCUMENTATION: Essence columns come from the tagged value, so basic_key
    /// and the populated reference always agree. A missing user or essence
    /// surfaces as NotFound through the foreign keys.
    pub async fn create(
        pool: &PgPool,
        photo: &str,
        essence: Essence,
        user_id: Uuid,
    ) -> Result<Photo, CatalogError> {
        let (basic_key, item_id, city_id, country_id) = essence.to_columns();

        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO photos (photo, basic_key, item_id, city_id, country_id, user_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            {} FROM p {}
            "#,
            PHOTO_SELECT, PHOTO_JOINS
        );

        let row = sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(photo)
            .bind(basic_key)
            .bind(item_id)
            .bind(city_id)
            .bind(country_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to create photo: {}", e);
                CatalogError::from_sqlx("Create photo", e)
            })?;

        let photo = Self::decode(row)?;
        log::info!(
            "Created photo {} tagged {} {}",
            photo.id,
            photo.essence.kind(),
            photo.essence.id()
        );
        Ok(photo)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Photo, CatalogError> {
        let sql = format!("{} FROM photos p {} WHERE p.id = $1", PHOTO_SELECT, PHOTO_JOINS);

        let row = sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching photo {}: {}", id, e);
                CatalogError::from_sqlx("Fetch photo", e)
            })?
            .ok_or_else(|| {
                log::warn!("Photo not found: {}", id);
                CatalogError::NotFound(format!("photo {}", id))
            })?;

        Self::decode(row)
    }

    /// Every photo regardless of approval
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Photo>, CatalogError> {
        let sql = format!("{} FROM photos p {} {}", PHOTO_SELECT, PHOTO_JOINS, PHOTO_ORDER);

        let rows = sqlx::query_as::<_, PhotoRow>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list photos: {}", e);
                CatalogError::from_sqlx("List photos", e)
            })?;

        Self::decode_all(rows)
    }

    /// Photos still waiting for a moderator
    pub async fn unapproved(pool: &PgPool) -> Result<Vec<Photo>, CatalogError> {
        let sql = format!(
            "{} FROM photos p {} WHERE p.approved = FALSE {}",
            PHOTO_SELECT, PHOTO_JOINS, PHOTO_ORDER
        );

        let rows = sqlx::query_as::<_, PhotoRow>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch unapproved photos: {}", e);
                CatalogError::from_sqlx("Fetch unapproved photos", e)
            })?;

        Self::decode_all(rows)
    }

    /// Approved photos of the named essence of one kind
    /// DOCUMENTATION: `None` when no record of that kind carries the name
    /// (compared case-insensitively), otherwise the possibly empty list.
    pub async fn by_essence(
        pool: &PgPool,
        kind: EssenceKind,
        name: &str,
    ) -> Result<Option<Vec<Photo>>, CatalogError> {
        let Some(id) = Self::resolve_name(pool, kind, name).await? else {
            log::debug!("No {} named '{}'", kind, name);
            return Ok(None);
        };

        let sql = format!(
            "{} FROM photos p {} WHERE p.approved = TRUE AND p.basic_key = $1 AND p.{} = $2 {}",
            PHOTO_SELECT,
            PHOTO_JOINS,
            kind.photo_column(),
            PHOTO_ORDER
        );

        let rows = sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(kind.as_str())
            .bind(id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch photos of {} {}: {}", kind, id, e);
                CatalogError::from_sqlx("Fetch photos by essence", e)
            })?;

        Self::decode_all(rows).map(Some)
    }

    /// Approved photos of whatever essence carries the name
    /// DOCUMENTATION: Countries are consulted first, then cities, then items;
    /// the first kind with a match decides. `None` when nothing matches.
    pub async fn by_type(pool: &PgPool, name: &str) -> Result<Option<Vec<Photo>>, CatalogError> {
        for kind in EssenceKind::NAME_PRIORITY {
            let Some(id) = Self::resolve_name(pool, kind, name).await? else {
                continue;
            };

            log::debug!("'{}' resolved to {} {}", name, kind, id);
            let sql = format!(
                "{} FROM photos p {} WHERE p.approved = TRUE AND p.{} = $1 {}",
                PHOTO_SELECT,
                PHOTO_JOINS,
                kind.photo_column(),
                PHOTO_ORDER
            );

            let rows = sqlx::query_as::<_, PhotoRow>(&sql)
                .bind(id)
                .fetch_all(pool)
                .await
                .map_err(|e| {
                    log::error!("Failed to fetch photos of {} {}: {}", kind, id, e);
                    CatalogError::from_sqlx("Fetch photos by name", e)
                })?;

            return Self::decode_all(rows).map(Some);
        }

        log::debug!("No essence named '{}'", name);
        Ok(None)
    }

    /// Mark a photo approved and return it
    pub async fn approve(pool: &PgPool, id: Uuid) -> Result<Photo, CatalogError> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE photos SET approved = TRUE
                WHERE id = $1
                RETURNING *
            )
            {} FROM p {}
            "#,
            PHOTO_SELECT, PHOTO_JOINS
        );

        let row = sqlx::query_as::<_, PhotoRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to approve photo {}: {}", id, e);
                CatalogError::from_sqlx("Approve photo", e)
            })?
            .ok_or_else(|| CatalogError::NotFound(format!("photo {}", id)))?;

        let photo = Self::decode(row)?;
        log::info!("Approved photo {} of {}", photo.id, photo);
        Ok(photo)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), CatalogError> {
        let rows = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for photo {}: {}", id, e);
                CatalogError::from_sqlx("Delete photo", e)
            })?
            .rows_affected();

        if rows == 0 {
            return Err(CatalogError::NotFound(format!("photo {}", id)));
        }

        log::info!("Deleted photo: {}", id);
        Ok(())
    }

    /// Id of the earliest record of `kind` whose name matches case-insensitively
    async fn resolve_name(
        pool: &PgPool,
        kind: EssenceKind,
        name: &str,
    ) -> Result<Option<Uuid>, CatalogError> {
        let id = match kind {
            EssenceKind::Country => CountryRepository::find_by_name_iexact(pool, name)
                .await?
                .map(|c| c.id),
            EssenceKind::City => CityRepository::find_by_name_iexact(pool, name)
                .await?
                .map(|c| c.id),
            EssenceKind::Item => ItemRepository::find_by_name_iexact(pool, name)
                .await?
                .map(|i| i.id),
        };
        Ok(id)
    }

    fn decode(row: PhotoRow) -> Result<Photo, CatalogError> {
        Photo::try_from(row).map_err(|e| {
            log::error!("Inconsistent photo row: {}", e);
            CatalogError::from(e)
        })
    }

    fn decode_all(rows: Vec<PhotoRow>) -> Result<Vec<Photo>, CatalogError> {
        rows.into_iter().map(Self::decode).collect()
    }
}
