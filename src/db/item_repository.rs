// src/db/item_repository.rs
// DOCUMENTATION: Item database operations
// PURPOSE: Handle CRUD operations for catalog items

use crate::errors::CatalogError;
use crate::models::{CreateItemRequest, Item};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ItemRepository;

impl ItemRepository {
    pub async fn create(pool: &PgPool, req: &CreateItemRequest) -> Result<Item, CatalogError> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(&req.name)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create item {}: {}", req.name, e);
            CatalogError::from_sqlx("Create item", e)
        })?;

        log::info!("Created item {} ({})", item, item.id);
        Ok(item)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Item, CatalogError> {
        sqlx::query_as::<_, Item>("SELECT id, name, created_at FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching item {}: {}", id, e);
                CatalogError::from_sqlx("Fetch item", e)
            })?
            .ok_or_else(|| {
                log::warn!("Item not found: {}", id);
                CatalogError::NotFound(format!("item {}", id))
            })
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Item>, CatalogError> {
        sqlx::query_as::<_, Item>("SELECT id, name, created_at FROM items ORDER BY name ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to list items: {}", e);
                CatalogError::from_sqlx("List items", e)
            })
    }

    /// Case-insensitive exact name match; earliest record wins if several match
    pub async fn find_by_name_iexact(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Item>, CatalogError> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, created_at
            FROM items
            WHERE LOWER(name) = LOWER($1)
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to look up item '{}': {}", name, e);
            CatalogError::from_sqlx("Find item", e)
        })
    }

    /// Delete an item and, through the cascade, every photo tagged with it
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), CatalogError> {
        let rows = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for item {}: {}", id, e);
                CatalogError::from_sqlx("Delete item", e)
            })?
            .rows_affected();

        if rows == 0 {
            return Err(CatalogError::NotFound(format!("item {}", id)));
        }

        log::info!("Deleted item: {}", id);
        Ok(())
    }
}
