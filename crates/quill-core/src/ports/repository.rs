use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Comment, CommentModerationView, CommentStatus, CommentWithAuthor, Post, PostDetail, PostPatch,
    PostWithRelations, User,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// List posts newest-first, optionally filtered by the published flag,
    /// joined with author, category and tags.
    async fn find_all(&self, published: Option<bool>)
    -> Result<Vec<PostWithRelations>, RepoError>;

    /// Resolve a post by its public slug, with full relations.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostDetail>, RepoError>;

    /// Resolve a post by id, with full relations.
    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError>;

    /// Apply a partial update. Fails with `RepoError::NotFound` for unknown ids.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Approved comments for a post, newest-first, joined with their author.
    async fn find_approved_by_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, RepoError>;

    /// Every comment regardless of status, joined with post title and author.
    async fn find_all(&self) -> Result<Vec<CommentModerationView>, RepoError>;

    /// Set the moderation status. Fails with `RepoError::NotFound` for unknown ids.
    async fn update_status(&self, id: Uuid, status: CommentStatus) -> Result<Comment, RepoError>;
}
