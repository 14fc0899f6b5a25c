// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for photos and the essence queries
// PURPOSE: Parse requests, call PhotoService, return responses

use crate::config::Config;
use crate::errors::CatalogError;
use crate::handlers::auth::{verify_moderator, verify_user_or_moderator};
use crate::models::CreatePhotoRequest;
use crate::services::PhotoService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// POST /photos
/// Register a photo; it is hidden until approved
/// DOCUMENTATION: The caller must be the owning user named in the body, or a
/// moderator posting on someone's behalf.
pub async fn create_photo(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreatePhotoRequest>,
) -> Result<impl Responder, CatalogError> {
    let body = body.into_inner();
    verify_user_or_moderator(&req, pool.get_ref(), &config, body.user_id).await?;

    let photo = PhotoService::create_photo(pool.get_ref(), &config.media_root, body).await?;
    Ok(HttpResponse::Created().json(photo))
}

/// GET /photos (moderator)
/// Every photo including those still awaiting approval
pub async fn list_photos(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    let photos = PhotoService::list_photos(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// GET /photos/{id}
/// DOCUMENTATION: An unapproved photo is visible only to its owner and to
/// moderators; anyone else gets the same 404 as for a missing id.
pub async fn get_photo(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    let photo = PhotoService::get_photo(pool.get_ref(), path.into_inner()).await?;

    if !photo.approved {
        match verify_user_or_moderator(&req, pool.get_ref(), &config, photo.user_id).await {
            Ok(()) => {}
            Err(CatalogError::Unauthorized | CatalogError::Forbidden) => {
                log::debug!("Hiding pending photo {} from caller", photo.id);
                return Err(CatalogError::NotFound(format!("photo {}", photo.id)));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(HttpResponse::Ok().json(photo))
}

/// DELETE /photos/{id}
/// The owner or a moderator may delete a photo
pub async fn delete_photo(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    let id = path.into_inner();
    let photo = PhotoService::get_photo(pool.get_ref(), id).await?;
    verify_user_or_moderator(&req, pool.get_ref(), &config, photo.user_id).await?;

    PhotoService::delete_photo(pool.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /photos/essence/{type}/{name}
/// Approved photos of the named item, city or country
pub async fn photos_by_essence(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, CatalogError> {
    let (essence_type, essence_name) = path.into_inner();

    match PhotoService::by_essence(pool.get_ref(), &essence_type, &essence_name).await? {
        Some(photos) => Ok(HttpResponse::Ok().json(photos)),
        None => Err(CatalogError::NotFound(format!(
            "no {} named '{}'",
            essence_type, essence_name
        ))),
    }
}

/// GET /photos/by-name/{name}
/// Approved photos of whichever country, city or item carries the name
pub async fn photos_by_name(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, CatalogError> {
    let essence_name = path.into_inner();

    match PhotoService::by_type(pool.get_ref(), &essence_name).await? {
        Some(photos) => Ok(HttpResponse::Ok().json(photos)),
        None => Err(CatalogError::NotFound(format!(
            "nothing named '{}'",
            essence_name
        ))),
    }
}

/// Configuration for photo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/photos")
            .route("", web::get().to(list_photos))
            .route("", web::post().to(create_photo))
            .route("/essence/{type}/{name}", web::get().to(photos_by_essence))
            .route("/by-name/{name}", web::get().to(photos_by_name))
            .route("/{id}", web::get().to(get_photo))
            .route("/{id}", web::delete().to(delete_photo)),
    );
}
