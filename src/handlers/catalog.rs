// src/handlers/catalog.rs
// DOCUMENTATION: HTTP handlers for countries, cities, items and users
// PURPOSE: Parse requests, call services, return responses

use crate::config::Config;
use crate::db::{CityRepository, CountryRepository, ItemRepository, UserRepository};
use crate::errors::CatalogError;
use crate::handlers::auth::{verify_moderator, verify_user_or_moderator};
use crate::models::{
    CityFilter, CreateCityRequest, CreateCountryRequest, CreateItemRequest, CreateUserRequest,
    SetModeratorRequest,
};
use crate::services::CatalogService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// GET /countries
pub async fn list_countries(pool: web::Data<PgPool>) -> Result<impl Responder, CatalogError> {
    let countries = CountryRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(countries))
}

/// POST /countries (moderator)
pub async fn create_country(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateCountryRequest>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    let country = CatalogService::create_country(pool.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(country))
}

/// GET /countries/{id}
pub async fn get_country(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    let country = CountryRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(country))
}

/// DELETE /countries/{id} (moderator)
/// Removes the country's cities and every photo tagged with either
pub async fn delete_country(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    CountryRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /cities?country_id=
pub async fn list_cities(
    pool: web::Data<PgPool>,
    query: web::Query<CityFilter>,
) -> Result<impl Responder, CatalogError> {
    let cities = CityRepository::list(pool.get_ref(), query.country_id).await?;
    Ok(HttpResponse::Ok().json(cities))
}

/// POST /cities (moderator)
pub async fn create_city(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateCityRequest>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    let city = CatalogService::create_city(pool.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(city))
}

/// GET /cities/{id}
pub async fn get_city(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    let city = CityRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// DELETE /cities/{id} (moderator)
pub async fn delete_city(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    CityRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /items
pub async fn list_items(pool: web::Data<PgPool>) -> Result<impl Responder, CatalogError> {
    let items = ItemRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// POST /items (moderator)
pub async fn create_item(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateItemRequest>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    let item = CatalogService::create_item(pool.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(item))
}

/// GET /items/{id}
pub async fn get_item(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    let item = ItemRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /items/{id} (moderator)
pub async fn delete_item(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    ItemRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /users
pub async fn list_users(pool: web::Data<PgPool>) -> Result<impl Responder, CatalogError> {
    let users = UserRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users
/// Anyone may register; only moderators may register another moderator
pub async fn create_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> Result<impl Responder, CatalogError> {
    let body = body.into_inner();
    let may_grant_moderator = if body.moderator {
        verify_moderator(&req, pool.get_ref(), &config).await?;
        true
    } else {
        false
    };

    let user = CatalogService::create_user(pool.get_ref(), body, may_grant_moderator).await?;
    Ok(HttpResponse::Created().json(user))
}

/// GET /users/{id}
pub async fn get_user(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    let user = UserRepository::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /users/{id}
/// A user may delete themselves; moderators may delete anyone
pub async fn delete_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, CatalogError> {
    let id = path.into_inner();
    verify_user_or_moderator(&req, pool.get_ref(), &config, id).await?;

    UserRepository::delete(pool.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /users/{id}/moderator (moderator)
pub async fn set_moderator(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<SetModeratorRequest>,
) -> Result<impl Responder, CatalogError> {
    verify_moderator(&req, pool.get_ref(), &config).await?;
    let user =
        UserRepository::set_moderator(pool.get_ref(), path.into_inner(), body.moderator).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Configuration for catalog routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/countries")
            .route("", web::get().to(list_countries))
            .route("", web::post().to(create_country))
            .route("/{id}", web::get().to(get_country))
            .route("/{id}", web::delete().to(delete_country)),
    )
    .service(
        web::scope("/cities")
            .route("", web::get().to(list_cities))
            .route("", web::post().to(create_city))
            .route("/{id}", web::get().to(get_city))
            .route("/{id}", web::delete().to(delete_city)),
    )
    .service(
        web::scope("/items")
            .route("", web::get().to(list_items))
            .route("", web::post().to(create_item))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::delete().to(delete_item)),
    )
    .service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::delete().to(delete_user))
            .route("/{id}/moderator", web::put().to(set_moderator)),
    );
}
