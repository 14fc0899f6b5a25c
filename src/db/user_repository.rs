// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Handle CRUD operations for users and the moderator flag

use crate::errors::CatalogError;
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub async fn create(pool: &PgPool, name: &str, moderator: bool) -> Result<User, CatalogError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, moderator)
            VALUES ($1, $2)
            RETURNING id, name, moderator, created_at
            "#,
        )
        .bind(name)
        .bind(moderator)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create user {}: {}", name, e);
            CatalogError::from_sqlx("Create user", e)
        })?;

        log::info!(
            "Created user {} ({}), moderator: {}",
            user,
            user.id,
            user.moderator
        );
        Ok(user)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<User, CatalogError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, moderator, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Database error fetching user {}: {}", id, e);
            CatalogError::from_sqlx("Fetch user", e)
        })?
        .ok_or_else(|| {
            log::warn!("User not found: {}", id);
            CatalogError::NotFound(format!("user {}", id))
        })
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<User>, CatalogError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, moderator, created_at FROM users ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list users: {}", e);
            CatalogError::from_sqlx("List users", e)
        })
    }

    pub async fn set_moderator(
        pool: &PgPool,
        id: Uuid,
        moderator: bool,
    ) -> Result<User, CatalogError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET moderator = $1
            WHERE id = $2
            RETURNING id, name, moderator, created_at
            "#,
        )
        .bind(moderator)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update moderator flag for {}: {}", id, e);
            CatalogError::from_sqlx("Set moderator", e)
        })?
        .ok_or_else(|| CatalogError::NotFound(format!("user {}", id)))?;

        log::info!("User {} moderator flag set to {}", user.id, user.moderator);
        Ok(user)
    }

    /// Delete a user and, through the cascade, all of their photos
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), CatalogError> {
        let rows = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for user {}: {}", id, e);
                CatalogError::from_sqlx("Delete user", e)
            })?
            .rows_affected();

        if rows == 0 {
            return Err(CatalogError::NotFound(format!("user {}", id)));
        }

        log::info!("Deleted user: {}", id);
        Ok(())
    }
}
