// src/services/photo_service.rs
// DOCUMENTATION: Business logic for photos
// PURPOSE: Intermediary between handlers and PhotoRepository

use crate::db::PhotoRepository;
use crate::errors::CatalogError;
use crate::models::{CreatePhotoRequest, EssenceKind, PhotoResponse};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct PhotoService;

impl PhotoService {
    /// Register an uploaded photo; it stays hidden until a moderator approves it
    pub async fn create_photo(
        pool: &PgPool,
        media_root: &str,
        req: CreatePhotoRequest,
    ) -> Result<PhotoResponse, CatalogError> {
        req.validate()
            .map_err(|e| CatalogError::ValidationError(e.to_string()))?;

        let reference = media_reference(media_root, &req.photo)?;
        let photo = PhotoRepository::create(pool, &reference, req.essence, req.user_id).await?;
        Ok(photo.to_response())
    }

    pub async fn get_photo(pool: &PgPool, id: Uuid) -> Result<PhotoResponse, CatalogError> {
        let photo = PhotoRepository::get_by_id(pool, id).await?;
        Ok(photo.to_response())
    }

    pub async fn delete_photo(pool: &PgPool, id: Uuid) -> Result<(), CatalogError> {
        PhotoRepository::delete(pool, id).await
    }

    /// Every photo, approved or not
    pub async fn list_photos(pool: &PgPool) -> Result<Vec<PhotoResponse>, CatalogError> {
        let photos = PhotoRepository::list_all(pool).await?;
        Ok(photos.iter().map(|p| p.to_response()).collect())
    }

    pub async fn unapproved(pool: &PgPool) -> Result<Vec<PhotoResponse>, CatalogError> {
        let photos = PhotoRepository::unapproved(pool).await?;
        Ok(photos.iter().map(|p| p.to_response()).collect())
    }

    pub async fn approve(pool: &PgPool, id: Uuid) -> Result<PhotoResponse, CatalogError> {
        let photo = PhotoRepository::approve(pool, id).await?;
        Ok(photo.to_response())
    }

    /// Approved photos of a named essence of the given kind
    /// DOCUMENTATION: An unrecognized `essence_type` is treated like an unknown
    /// name: the result is `None`, not an error.
    pub async fn by_essence(
        pool: &PgPool,
        essence_type: &str,
        essence_name: &str,
    ) -> Result<Option<Vec<PhotoResponse>>, CatalogError> {
        let kind = match essence_type.parse::<EssenceKind>() {
            Ok(kind) => kind,
            Err(e) => {
                log::debug!("by_essence: {}", e);
                return Ok(None);
            }
        };

        let photos = PhotoRepository::by_essence(pool, kind, essence_name).await?;
        Ok(photos.map(|list| list.iter().map(|p| p.to_response()).collect()))
    }

    /// Approved photos of whichever essence carries the name
    pub async fn by_type(
        pool: &PgPool,
        essence_name: &str,
    ) -> Result<Option<Vec<PhotoResponse>>, CatalogError> {
        let photos = PhotoRepository::by_type(pool, essence_name).await?;
        Ok(photos.map(|list| list.iter().map(|p| p.to_response()).collect()))
    }
}

/// Build the stored image reference for a file under the media root
/// DOCUMENTATION: Accepts either a bare file name or a path already under the
/// root; absolute paths and parent-directory segments are rejected.
pub fn media_reference(media_root: &str, file: &str) -> Result<String, CatalogError> {
    let file = file.trim();
    if file.is_empty() {
        return Err(CatalogError::InvalidInput("photo reference is empty".into()));
    }
    if file.starts_with('/') || file.split('/').any(|segment| segment == "..") {
        return Err(CatalogError::InvalidInput(format!(
            "photo reference '{}' escapes the media root",
            file
        )));
    }

    let root = media_root.trim_end_matches('/');
    if file.starts_with(&format!("{}/", root)) {
        Ok(file.to_string())
    } else {
        Ok(format!("{}/{}", root, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_reference_prefixes_root() {
        assert_eq!(
            media_reference("media/photos/", "chair.jpg").unwrap(),
            "media/photos/chair.jpg"
        );
        assert_eq!(
            media_reference("media/photos", "2024/chair.jpg").unwrap(),
            "media/photos/2024/chair.jpg"
        );
    }

    #[test]
    fn test_media_reference_keeps_existing_prefix() {
        assert_eq!(
            media_reference("media/photos/", "media/photos/chair.jpg").unwrap(),
            "media/photos/chair.jpg"
        );
    }

    #[test]
    fn test_media_reference_rejects_escapes() {
        assert!(matches!(
            media_reference("media/photos/", "../secret.jpg"),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            media_reference("media/photos/", "/etc/passwd"),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            media_reference("media/photos/", "  "),
            Err(CatalogError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_essence_type_is_absent_without_touching_the_pool() {
        // connect_lazy never opens a connection unless a query runs
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://nobody@localhost:1/none")
            .unwrap();

        let result = PhotoService::by_essence(&pool, "person", "Anna").await;

        assert!(matches!(result, Ok(None)));
    }
}
