//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the SeaORM persistence layer and the JWT/Argon2
//! authentication services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::DatabaseConnections;
