// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod catalog_service;
pub mod photo_service;

pub use catalog_service::*;
pub use photo_service::*;
