use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// Moderation status of a comment.
///
/// Every comment starts as `Pending` and only moves via an explicit admin
/// update; there are no automatic transitions and no terminal states (an
/// approved comment can be sent back to pending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "PENDING",
            CommentStatus::Approved => "APPROVED",
            CommentStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comment entity - attached to a post, submitted by a user or a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Present only when the comment was submitted by an authenticated user.
    pub author_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment. Status is always `Pending` regardless of caller.
    pub fn new(
        post_id: Uuid,
        content: String,
        author_id: Option<Uuid>,
        guest_name: Option<String>,
        guest_email: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            guest_name,
            guest_email,
            content,
            status: CommentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// A comment joined with its author, for public comment listings.
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<User>,
}

/// A comment joined with its post title and author, for the moderation queue.
#[derive(Debug, Clone)]
pub struct CommentModerationView {
    pub comment: Comment,
    pub post_title: Option<String>,
    pub author: Option<User>,
}
