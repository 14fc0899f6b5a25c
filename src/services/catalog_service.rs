// src/services/catalog_service.rs
// DOCUMENTATION: Business logic for the named catalog records
// PURPOSE: Validate requests before they reach the country/city/item/user repositories

use crate::db::{CityRepository, CountryRepository, ItemRepository, UserRepository};
use crate::errors::CatalogError;
use crate::models::{
    City, Country, CreateCityRequest, CreateCountryRequest, CreateItemRequest, CreateUserRequest,
    Item, User,
};
use sqlx::PgPool;
use validator::Validate;

pub struct CatalogService;

impl CatalogService {
    pub async fn create_country(
        pool: &PgPool,
        req: CreateCountryRequest,
    ) -> Result<Country, CatalogError> {
        validate(&req)?;
        CountryRepository::create(pool, &req).await
    }

    pub async fn create_city(pool: &PgPool, req: CreateCityRequest) -> Result<City, CatalogError> {
        validate(&req)?;
        CityRepository::create(pool, &req).await
    }

    pub async fn create_item(pool: &PgPool, req: CreateItemRequest) -> Result<Item, CatalogError> {
        validate(&req)?;
        ItemRepository::create(pool, &req).await
    }

    /// Create a user
    /// DOCUMENTATION: `may_grant_moderator` is decided by the caller's
    /// credentials; without it a requested moderator flag is refused.
    pub async fn create_user(
        pool: &PgPool,
        req: CreateUserRequest,
        may_grant_moderator: bool,
    ) -> Result<User, CatalogError> {
        validate(&req)?;
        if req.moderator && !may_grant_moderator {
            log::warn!("Refused moderator flag for new user {}", req.name);
            return Err(CatalogError::Forbidden);
        }
        UserRepository::create(pool, &req.name, req.moderator).await
    }
}

/// Run `validator` rules and report failures as ValidationError
fn validate<T: Validate>(req: &T) -> Result<(), CatalogError> {
    req.validate()
        .map_err(|e| CatalogError::ValidationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_long_names() {
        let req = CreateItemRequest {
            name: "c".repeat(101),
        };
        assert!(matches!(
            validate(&req),
            Err(CatalogError::ValidationError(_))
        ));

        let req = CreateItemRequest {
            name: "c".repeat(100),
        };
        tokio_test::assert_ok!(validate(&req));
    }

    #[tokio::test]
    async fn test_moderator_flag_needs_permission() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://nobody@localhost:1/none")
            .unwrap();
        let req = CreateUserRequest {
            name: "mallory".to_string(),
            moderator: true,
        };

        let result = CatalogService::create_user(&pool, req, false).await;

        assert!(matches!(result, Err(CatalogError::Forbidden)));
    }
}
