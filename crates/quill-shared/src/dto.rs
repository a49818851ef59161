//! Data Transfer Objects - request/response types for the API.
//!
//! Post and comment payloads use camelCase field names, matching what the
//! frontend sends and renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::{
    Category, Comment, CommentModerationView, CommentStatus, CommentWithAuthor, Post, PostDetail,
    PostPatch, PostWithRelations, Tag, User,
};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

/// Partial update for a post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            content: req.content,
            summary: req.summary,
            published: req.published,
            category_id: req.category_id,
        }
    }
}

/// Author of a post, reduced to public fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub name: String,
    pub email: String,
}

impl From<User> for AuthorResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// A post with its joined relations. `comments` is present only on
/// single-post lookups, not on listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub published: bool,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Option<AuthorResponse>,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<TagResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResponse>>,
}

impl PostResponse {
    fn from_parts(
        post: Post,
        author: Option<User>,
        category: Option<Category>,
        tags: Vec<Tag>,
        comments: Option<Vec<Comment>>,
    ) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            summary: post.summary,
            published: post.published,
            author_id: post.author_id,
            category_id: post.category_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author: author.map(Into::into),
            category: category.map(Into::into),
            tags: tags.into_iter().map(Into::into).collect(),
            comments: comments
                .map(|list| list.into_iter().map(CommentResponse::from).collect()),
        }
    }
}

impl From<PostWithRelations> for PostResponse {
    fn from(p: PostWithRelations) -> Self {
        Self::from_parts(p.post, p.author, p.category, p.tags, None)
    }
}

impl From<PostDetail> for PostResponse {
    fn from(p: PostDetail) -> Self {
        Self::from_parts(p.post, p.author, p.category, p.tags, Some(p.comments))
    }
}

/// A bare post without relations, as returned by create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub published: bool,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostSummaryResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            summary: post.summary,
            published: post.published,
            author_id: post.author_id,
            category_id: post.category_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Request to create a comment (guest or authenticated).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub post_id: Uuid,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_email: Option<String>,
}

/// Request to set a comment's moderation status.
///
/// `CommentStatus` is a closed enumeration, so unknown status strings are
/// rejected at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentStatusRequest {
    pub status: CommentStatus,
}

/// Author of a comment, reduced to the fields shown next to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthorResponse {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommentAuthorResponse>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            guest_name: comment.guest_name,
            guest_email: comment.guest_email,
            content: comment.content,
            status: comment.status,
            created_at: comment.created_at,
            author: None,
        }
    }
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(c: CommentWithAuthor) -> Self {
        let author = c.author.map(|user| CommentAuthorResponse {
            name: user.name,
            role: user.role,
        });
        Self {
            author,
            ..Self::from(c.comment)
        }
    }
}

/// A comment in the admin moderation queue, with post title and author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationCommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub post_title: Option<String>,
    pub author: Option<AuthorResponse>,
}

impl From<CommentModerationView> for ModerationCommentResponse {
    fn from(view: CommentModerationView) -> Self {
        Self {
            id: view.comment.id,
            post_id: view.comment.post_id,
            author_id: view.comment.author_id,
            guest_name: view.comment.guest_name,
            guest_email: view.comment.guest_email,
            content: view.comment.content,
            status: view.comment.status,
            created_at: view.comment.created_at,
            post_title: view.post_title,
            author: view.author.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_comment_request_accepts_camel_case() {
        let json = r#"{"content":"nice!","postId":"4b4b1c9e-9f5a-4d2a-8b1e-2f6a0c1d9e3f"}"#;
        let req: CreateCommentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.content, "nice!");
        assert!(req.guest_name.is_none());
        assert!(req.guest_email.is_none());
    }

    #[test]
    fn update_status_request_rejects_unknown_status() {
        let result = serde_json::from_str::<UpdateCommentStatusRequest>(r#"{"status":"BOGUS"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn listing_post_response_omits_comments_field() {
        let post = Post::new(
            Uuid::new_v4(),
            "Hi".to_string(),
            "hi".to_string(),
            "body".to_string(),
        );
        let response = PostResponse::from(PostWithRelations {
            post,
            author: None,
            category: None,
            tags: vec![],
        });

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("comments").is_none());
        assert_eq!(json["slug"], "hi");
    }
}
