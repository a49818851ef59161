use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Comment, Tag, User};

/// Post entity - a blog article with a unique slug used as its public lookup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub published: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new unpublished post with generated ID and timestamps.
    pub fn new(author_id: Uuid, title: String, slug: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            content,
            summary: None,
            published: false,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a post. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub published: Option<bool>,
    pub category_id: Option<Uuid>,
}

/// A post joined with its author, category and tags, as returned by listings.
#[derive(Debug, Clone)]
pub struct PostWithRelations {
    pub post: Post,
    pub author: Option<User>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

/// A single post with full relations, including its comments.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub author: Option<User>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub comments: Vec<Comment>,
}
