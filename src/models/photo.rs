// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use super::{Essence, EssenceKind, EssenceMismatch};

/// Raw `photos` row joined with the name of its essence
/// DOCUMENTATION: Storage shape only; converted into `Photo` via TryFrom so a
/// row whose basic_key disagrees with its references never escapes the repository.
#[derive(Debug, Clone, FromRow)]
pub struct PhotoRow {
    pub id: Uuid,
    pub photo: String,
    pub approved: bool,
    pub basic_key: String,
    pub item_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub country_id: Option<Uuid>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    pub essence_name: Option<String>,
}

/// Uploaded image tagged with a single essence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    /// Image reference relative to the media root's parent (e.g. "media/photos/a.jpg")
    pub photo: String,
    pub approved: bool,
    pub essence: Essence,
    pub essence_name: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A stored photo row that cannot be turned into a `Photo`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("photo {id}: {source}")]
pub struct CorruptPhoto {
    pub id: Uuid,
    #[source]
    pub source: EssenceMismatch,
}

impl TryFrom<PhotoRow> for Photo {
    type Error = CorruptPhoto;

    fn try_from(row: PhotoRow) -> Result<Self, Self::Error> {
        let essence =
            Essence::from_columns(&row.basic_key, row.item_id, row.city_id, row.country_id)
                .map_err(|source| CorruptPhoto { id: row.id, source })?;

        Ok(Photo {
            id: row.id,
            photo: row.photo,
            approved: row.approved,
            essence,
            essence_name: row.essence_name,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

/// Renders as the name of the depicted essence
impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.essence_name.as_deref().unwrap_or(""))
    }
}

/// Request to create a new photo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePhotoRequest {
    /// File name or path of the image under the media root
    #[validate(length(min = 1, max = 200))]
    pub photo: String,
    pub essence: Essence,
    pub user_id: Uuid,
}

/// Photo DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub photo: String,
    pub approved: bool,
    pub basic_key: EssenceKind,
    pub essence_id: Uuid,
    pub essence_name: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Convert database photo into API response DTO
    pub fn to_response(&self) -> PhotoResponse {
        PhotoResponse {
            id: self.id,
            photo: self.photo.clone(),
            approved: self.approved,
            basic_key: self.essence.kind(),
            essence_id: self.essence.id(),
            essence_name: self.essence_name.clone(),
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}
