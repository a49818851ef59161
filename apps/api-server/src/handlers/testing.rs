//! In-memory repository doubles and app-building helpers for handler tests.

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error, test, web};
use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::{
    Comment, CommentModerationView, CommentStatus, CommentWithAuthor, Post, PostDetail, PostPatch,
    PostWithRelations, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentRepository, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use quill_infra::auth::{JwtConfig, JwtTokenService};
use quill_infra::Argon2PasswordService;

use crate::handlers::configure_routes;
use crate::state::AppState;

#[derive(Default)]
pub(crate) struct InMemoryPosts {
    inner: Mutex<Vec<Post>>,
}

impl InMemoryPosts {
    pub fn insert(&self, post: Post) {
        self.inner.lock().unwrap().push(post);
    }

    pub fn all(&self) -> Vec<Post> {
        self.inner.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.inner.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.inner.lock().unwrap();
        if posts.iter().any(|p| p.slug == entity.slug) {
            return Err(RepoError::Constraint("duplicate slug".to_string()));
        }
        posts.push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.inner.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_all(
        &self,
        published: Option<bool>,
    ) -> Result<Vec<PostWithRelations>, RepoError> {
        let mut posts: Vec<Post> = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|p| published.is_none_or(|flag| p.published == flag))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts
            .into_iter()
            .map(|post| PostWithRelations {
                post,
                author: None,
                category: None,
                tags: vec![],
            })
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostDetail>, RepoError> {
        let post = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug)
            .cloned();
        Ok(post.map(detail))
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError> {
        let post = self.inner.lock().unwrap().iter().find(|p| p.id == id).cloned();
        Ok(post.map(detail))
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        let mut posts = self.inner.lock().unwrap();
        let post = posts.iter_mut().find(|p| p.id == id).ok_or(RepoError::NotFound)?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(slug) = patch.slug {
            post.slug = slug;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(summary) = patch.summary {
            post.summary = Some(summary);
        }
        if let Some(published) = patch.published {
            post.published = published;
        }
        if let Some(category_id) = patch.category_id {
            post.category_id = Some(category_id);
        }

        Ok(post.clone())
    }
}

fn detail(post: Post) -> PostDetail {
    PostDetail {
        post,
        author: None,
        category: None,
        tags: vec![],
        comments: vec![],
    }
}

#[derive(Default)]
pub(crate) struct InMemoryComments {
    inner: Mutex<Vec<Comment>>,
}

impl InMemoryComments {
    pub fn insert(&self, comment: Comment) {
        self.inner.lock().unwrap().push(comment);
    }

    pub fn all(&self) -> Vec<Comment> {
        self.inner.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryComments {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.inner.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn save(&self, entity: Comment) -> Result<Comment, RepoError> {
        self.inner.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut comments = self.inner.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn find_approved_by_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let mut comments: Vec<Comment> = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id && c.status == CommentStatus::Approved)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(comments
            .into_iter()
            .map(|comment| CommentWithAuthor {
                comment,
                author: None,
            })
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<CommentModerationView>, RepoError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(|comment| CommentModerationView {
                comment,
                post_title: None,
                author: None,
            })
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: CommentStatus) -> Result<Comment, RepoError> {
        let mut comments = self.inner.lock().unwrap();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepoError::NotFound)?;
        comment.status = status;
        Ok(comment.clone())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUsers {
    inner: Mutex<Vec<User>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.inner.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.inner.lock().unwrap();
        if users.iter().any(|u| u.email == entity.email) {
            return Err(RepoError::Constraint("duplicate email".to_string()));
        }
        users.push(entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.inner.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// Everything a handler test needs: stub repositories, auth services, and a
/// known user id to mint tokens for.
pub(crate) struct TestContext {
    pub posts: Arc<InMemoryPosts>,
    pub comments: Arc<InMemoryComments>,
    pub users: Arc<InMemoryUsers>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
    pub user_id: Uuid,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(InMemoryPosts::default()),
            comments: Arc::new(InMemoryComments::default()),
            users: Arc::new(InMemoryUsers::default()),
            token_service: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "test".to_string(),
            })),
            password_service: Arc::new(Argon2PasswordService::new()),
            user_id: Uuid::new_v4(),
        }
    }

    fn state(&self) -> AppState {
        AppState {
            posts: self.posts.clone(),
            comments: self.comments.clone(),
            users: self.users.clone(),
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = Error>
    {
        test::init_service(
            App::new()
                .app_data(web::Data::new(self.state()))
                .app_data(web::Data::new(self.token_service.clone()))
                .app_data(web::Data::new(self.password_service.clone()))
                .configure(configure_routes),
        )
        .await
    }
}

/// Build a bearer Authorization header for the context's user.
pub(crate) fn auth_header(ctx: &TestContext, roles: &[&str]) -> (&'static str, String) {
    let token = ctx
        .token_service
        .generate_token(
            ctx.user_id,
            "test@example.com",
            roles.iter().map(|r| r.to_string()).collect(),
        )
        .unwrap();
    ("Authorization", format!("Bearer {token}"))
}
