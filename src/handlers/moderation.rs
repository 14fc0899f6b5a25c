// src/handlers/moderation.rs
// DOCUMENTATION: Moderator-only photo review endpoints
// PURPOSE: List pending photos and approve them

use crate::config::Config;
use crate::errors::CatalogError;
use crate::handlers::auth::verify_moderator;
use crate::services::PhotoService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Response for the review queue
#[derive(Debug, Serialize)]
pub struct ReviewQueueResponse<T> {
    pub pending: usize,
    pub photos: Vec<T>,
}

/// GET /moderation/photos
/// Photos waiting for approval
pub async fn unapproved_photos(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;

    let photos = PhotoService::unapproved(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ReviewQueueResponse {
        pending: photos.len(),
        photos,
    }))
}

/// POST /moderation/photos/{id}/approve
pub async fn approve_photo(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;

    let photo = PhotoService::approve(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// Configuration for moderation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/moderation")
            .route("/photos", web::get().to(unapproved_photos))
            .route("/photos/{id}/approve", web::post().to(approve_photo)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::auth::ADMIN_TOKEN_HEADER;
    use actix_web::{http::StatusCode, test, App};

    fn lazy_pool() -> PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://nobody@localhost:1/none")
            .unwrap()
    }

    #[actix_rt::test]
    async fn test_review_queue_requires_credentials() {
        let mut config = Config::from_lookup(|_| None);
        config.admin_token = "secret".to_string();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(config))
                .configure(super::config),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/moderation/photos").to_request();
        let resp = test::call_service(&app, anonymous).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let wrong_token = test::TestRequest::post()
            .uri(&format!("/moderation/photos/{}/approve", Uuid::new_v4()))
            .insert_header((ADMIN_TOKEN_HEADER, "guess"))
            .to_request();
        let resp = test::call_service(&app, wrong_token).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
