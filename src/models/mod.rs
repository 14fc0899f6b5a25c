// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod city;
pub mod country;
pub mod essence;
pub mod item;
pub mod photo;
pub mod user;

pub use city::*;
pub use country::*;
pub use essence::*;
pub use item::*;
pub use photo::*;
pub use user::*;
