// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components and embed the schema migrations

pub mod city_repository;
pub mod country_repository;
pub mod item_repository;
pub mod photo_repository;
pub mod user_repository;

pub use city_repository::*;
pub use country_repository::*;
pub use item_repository::*;
pub use photo_repository::*;
pub use user_repository::*;

/// Schema migrations under ./migrations, applied at startup and by DB-backed tests
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
