//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use quill_core::domain::{
    Comment, CommentModerationView, CommentStatus, CommentWithAuthor, PostDetail, PostPatch,
    PostWithRelations, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::category::Entity as CategoryEntity;
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::Entity as PostTagEntity;
use super::entity::tag::Entity as TagEntity;
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_write_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

impl PostgresPostRepository {
    /// Load the full relation set for a single post row.
    async fn load_detail(&self, model: post::Model) -> Result<PostDetail, RepoError> {
        let author = model
            .find_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        let category = model
            .find_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        let tags = model
            .find_related(TagEntity)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        let comments = model
            .find_related(CommentEntity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(PostDetail {
            post: model.into(),
            author: author.map(Into::into),
            category: category.map(Into::into),
            tags: tags.into_iter().map(Into::into).collect(),
            comments: comments.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(
        &self,
        published: Option<bool>,
    ) -> Result<Vec<PostWithRelations>, RepoError> {
        let mut query = PostEntity::find().order_by_desc(post::Column::CreatedAt);
        if let Some(published) = published {
            query = query.filter(post::Column::Published.eq(published));
        }

        let posts = query.all(&self.db).await.map_err(query_err)?;
        let authors = posts
            .load_one(UserEntity, &self.db)
            .await
            .map_err(query_err)?;
        let categories = posts
            .load_one(CategoryEntity, &self.db)
            .await
            .map_err(query_err)?;
        let tags = posts
            .load_many_to_many(TagEntity, PostTagEntity, &self.db)
            .await
            .map_err(query_err)?;

        Ok(posts
            .into_iter()
            .zip(authors)
            .zip(categories)
            .zip(tags)
            .map(|(((post, author), category), tags)| PostWithRelations {
                post: post.into(),
                author: author.map(Into::into),
                category: category.map(Into::into),
                tags: tags.into_iter().map(Into::into).collect(),
            })
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostDetail>, RepoError> {
        let model = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        match model {
            Some(model) => Ok(Some(self.load_detail(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        match model {
            Some(model) => Ok(Some(self.load_detail(model).await?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<quill_core::domain::Post, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(summary) = patch.summary {
            active.summary = Set(Some(summary));
        }
        if let Some(published) = patch.published {
            active.published = Set(published);
        }
        if let Some(category_id) = patch.category_id {
            active.category_id = Set(Some(category_id));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        // Slug changes can still collide with another post.
        let updated = active.update(&self.db).await.map_err(map_write_err)?;
        Ok(updated.into())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_approved_by_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let comments = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Status.eq(comment::CommentStatus::Approved))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let authors = comments
            .load_one(UserEntity, &self.db)
            .await
            .map_err(query_err)?;

        Ok(comments
            .into_iter()
            .zip(authors)
            .map(|(comment, author)| CommentWithAuthor {
                comment: comment.into(),
                author: author.map(Into::into),
            })
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<CommentModerationView>, RepoError> {
        let comments = CommentEntity::find()
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let posts = comments
            .load_one(PostEntity, &self.db)
            .await
            .map_err(query_err)?;
        let authors = comments
            .load_one(UserEntity, &self.db)
            .await
            .map_err(query_err)?;

        Ok(comments
            .into_iter()
            .zip(posts)
            .zip(authors)
            .map(|((comment, post), author)| CommentModerationView {
                comment: comment.into(),
                post_title: post.map(|p| p.title),
                author: author.map(Into::into),
            })
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: CommentStatus) -> Result<Comment, RepoError> {
        let model = CommentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        active.status = Set(status.into());

        let updated = active.update(&self.db).await.map_err(query_err)?;
        Ok(updated.into())
    }
}
