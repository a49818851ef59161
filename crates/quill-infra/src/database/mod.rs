//! Database connection management and repositories.

mod connections;
mod postgres_base;
pub mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
