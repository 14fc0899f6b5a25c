// src/test_support.rs
// DOCUMENTATION: Seed helpers shared by the database-backed tests

use crate::db::{CityRepository, CountryRepository, ItemRepository, UserRepository};
use crate::models::{
    City, Country, CreateCityRequest, CreateCountryRequest, CreateItemRequest, Item, User,
};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn seed_country(pool: &PgPool, name: &str) -> Country {
    CountryRepository::create(
        pool,
        &CreateCountryRequest {
            name: name.to_string(),
        },
    )
    .await
    .expect("seed country")
}

pub async fn seed_city(pool: &PgPool, name: &str, country_id: Uuid) -> City {
    CityRepository::create(
        pool,
        &CreateCityRequest {
            name: name.to_string(),
            country_id,
        },
    )
    .await
    .expect("seed city")
}

pub async fn seed_item(pool: &PgPool, name: &str) -> Item {
    ItemRepository::create(
        pool,
        &CreateItemRequest {
            name: name.to_string(),
        },
    )
    .await
    .expect("seed item")
}

pub async fn seed_user(pool: &PgPool, name: &str, moderator: bool) -> User {
    UserRepository::create(pool, name, moderator)
        .await
        .expect("seed user")
}
