//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_shared::dto::{CreatePostRequest, PostResponse, PostSummaryResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Optional filter on the published flag for listings.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub published: Option<String>,
}

impl ListPostsQuery {
    /// Anything other than the literals "true"/"false" means no filter.
    fn published_filter(&self) -> Option<bool> {
        match self.published.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }
}

/// POST /posts - create a post owned by the authenticated caller.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    if req.title.trim().is_empty() {
        errors.push("title must not be empty".to_string());
    }
    if req.slug.trim().is_empty() {
        errors.push("slug must not be empty".to_string());
    }
    if req.content.trim().is_empty() {
        errors.push("content must not be empty".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut post = Post::new(identity.user_id, req.title, req.slug, req.content);
    post.summary = req.summary;
    post.published = req.published.unwrap_or(false);
    post.category_id = req.category_id;

    // A duplicate slug surfaces as a constraint violation and becomes 409.
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post created");
    Ok(HttpResponse::Created().json(PostSummaryResponse::from(saved)))
}

/// GET /posts?published=true|false - list posts newest-first.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all(query.published_filter()).await?;

    let response: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /posts/id/{id} - fetch a post by id with full relations.
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let detail = state
        .posts
        .find_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(detail)))
}

/// GET /posts/{slug} - fetch a post by its public slug.
pub async fn get_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let detail = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", slug)))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(detail)))
}

/// PATCH /posts/{id} - apply a partial update.
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let updated = state.posts.update(id, body.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(PostSummaryResponse::from(updated)))
}

/// DELETE /posts/{id} - delete a post; its comments cascade at the store.
pub async fn remove(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
