//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;
mod tag;
mod user;

pub use category::Category;
pub use comment::{Comment, CommentModerationView, CommentStatus, CommentWithAuthor};
pub use post::{Post, PostDetail, PostPatch, PostWithRelations};
pub use tag::Tag;
pub use user::User;
