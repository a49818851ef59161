//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain;

/// Moderation status as stored in the `status` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CommentStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl From<CommentStatus> for domain::CommentStatus {
    fn from(status: CommentStatus) -> Self {
        match status {
            CommentStatus::Pending => domain::CommentStatus::Pending,
            CommentStatus::Approved => domain::CommentStatus::Approved,
            CommentStatus::Rejected => domain::CommentStatus::Rejected,
        }
    }
}

impl From<domain::CommentStatus> for CommentStatus {
    fn from(status: domain::CommentStatus) -> Self {
        match status {
            domain::CommentStatus::Pending => CommentStatus::Pending,
            domain::CommentStatus::Approved => CommentStatus::Approved,
            domain::CommentStatus::Rejected => CommentStatus::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Author,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Comment.
impl From<Model> for domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            author_id: model.author_id,
            guest_name: model.guest_name,
            guest_email: model.guest_email,
            content: model.content,
            status: model.status.into(),
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Comment to SeaORM ActiveModel.
impl From<domain::Comment> for ActiveModel {
    fn from(comment: domain::Comment) -> Self {
        Self {
            id: Set(comment.id),
            post_id: Set(comment.post_id),
            author_id: Set(comment.author_id),
            guest_name: Set(comment.guest_name),
            guest_email: Set(comment.guest_email),
            content: Set(comment.content),
            status: Set(comment.status.into()),
            created_at: Set(comment.created_at.into()),
        }
    }
}
