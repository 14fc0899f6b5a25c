// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod auth;
pub mod catalog;
pub mod health;
pub mod moderation;
pub mod photos;

pub use catalog::config as catalog_config;
pub use health::config as health_config;
pub use moderation::config as moderation_config;
pub use photos::config as photos_config;
