// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use crate::models::CorruptPhoto;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// PostgreSQL SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL SQLSTATE for check_violation
const CHECK_VIOLATION: &str = "23514";

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response.
/// "No photos for that name" is NOT an error: queries return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("Corrupt record: {0}")]
    CorruptRecord(#[from] CorruptPhoto),
}

impl CatalogError {
    /// Map a sqlx failure into a catalog error
    /// DOCUMENTATION: Constraint violations raised by PostgreSQL become
    /// client errors; everything else is reported as a database error.
    /// `context` names the operation for the message (e.g. "Create city").
    pub fn from_sqlx(context: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return CatalogError::AlreadyExists(format!(
                        "{}: {}",
                        context,
                        db_err.message()
                    ));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return CatalogError::NotFound(format!(
                        "{}: referenced record does not exist",
                        context
                    ));
                }
                Some(CHECK_VIOLATION) => {
                    return CatalogError::InvalidInput(format!(
                        "{}: {}",
                        context,
                        db_err.message()
                    ));
                }
                _ => {}
            }
        }
        CatalogError::DatabaseError(format!("{} failed: {}", context, err))
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "NOT_FOUND",
            CatalogError::AlreadyExists(_) => "ALREADY_EXISTS",
            CatalogError::DatabaseError(_) => "DATABASE_ERROR",
            CatalogError::InvalidInput(_) => "INVALID_INPUT",
            CatalogError::ValidationError(_) => "VALIDATION_ERROR",
            CatalogError::Unauthorized => "UNAUTHORIZED",
            CatalogError::Forbidden => "FORBIDDEN",
            CatalogError::CorruptRecord(_) => "CORRUPT_RECORD",
        }
    }
}

/// Convert CatalogError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for CatalogError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::AlreadyExists(_) => StatusCode::CONFLICT,
            CatalogError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CatalogError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CatalogError::Unauthorized => StatusCode::UNAUTHORIZED,
            CatalogError::Forbidden => StatusCode::FORBIDDEN,
            CatalogError::CorruptRecord(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CatalogError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::AlreadyExists("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(CatalogError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            CatalogError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_non_database_sqlx_error_maps_to_database_error() {
        let err = CatalogError::from_sqlx("Fetch photos", sqlx::Error::RowNotFound);
        match err {
            CatalogError::DatabaseError(msg) => assert!(msg.starts_with("Fetch photos failed")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_photo_is_a_server_error() {
        let corrupt = crate::models::Photo::try_from(crate::models::PhotoRow {
            id: uuid::Uuid::nil(),
            photo: "media/photos/a.jpg".to_string(),
            approved: true,
            basic_key: "city".to_string(),
            item_id: None,
            city_id: None,
            country_id: None,
            user_id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            essence_name: None,
        })
        .unwrap_err();

        let err = CatalogError::from(corrupt);
        assert_eq!(err.error_code(), "CORRUPT_RECORD");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn test_error_response_body() {
        let resp = CatalogError::Forbidden.error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "FORBIDDEN");
        assert_eq!(json["error"]["message"], "Forbidden access");
    }
}
