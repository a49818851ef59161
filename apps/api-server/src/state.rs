//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CommentRepository, PostRepository, UserRepository};
use quill_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
///
/// Repositories are stateless; every request is a single round trip to the
/// store through one of them.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state on top of the database connection pool.
    pub fn new(db: &DatabaseConnections) -> Self {
        let state = Self {
            posts: Arc::new(PostgresPostRepository::new(db.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.main.clone())),
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
        };

        tracing::info!("Application state initialized");
        state
    }
}
