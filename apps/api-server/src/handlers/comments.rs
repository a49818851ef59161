//! Comment handlers - creation and moderation.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_core::ports::{BaseRepository, CommentRepository};
use quill_shared::dto::{
    CommentResponse, CreateCommentRequest, ModerationCommentResponse, UpdateCommentStatusRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn build_comment(req: CreateCommentRequest, author_id: Option<Uuid>) -> Result<Comment, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "content must not be empty".to_string(),
        ]));
    }

    Ok(Comment::new(
        req.post_id,
        req.content,
        author_id,
        req.guest_name,
        req.guest_email,
    ))
}

/// POST /comments - guest comment creation. No identity is read here;
/// authenticated callers use the dedicated endpoint below.
pub async fn create_guest(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = build_comment(body.into_inner(), None)?;

    let saved = state.comments.save(comment).await?;

    tracing::info!(comment_id = %saved.id, post_id = %saved.post_id, "Guest comment created");
    Ok(HttpResponse::Created().json(CommentResponse::from(saved)))
}

/// POST /comments/auth - comment creation with the author taken from the
/// bearer token. Status still starts as pending.
pub async fn create_authenticated(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = build_comment(body.into_inner(), Some(identity.user_id))?;

    let saved = state.comments.save(comment).await?;

    tracing::info!(comment_id = %saved.id, post_id = %saved.post_id, "Comment created");
    Ok(HttpResponse::Created().json(CommentResponse::from(saved)))
}

/// GET /posts/{post_id}/comments - approved comments for a post.
pub async fn list_for_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let comments = state.comments.find_approved_by_post(post_id).await?;

    let response: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /admin/comments - every comment regardless of status.
pub async fn admin_list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    if !identity.has_role("admin") {
        return Err(AppError::Forbidden);
    }

    let comments = state.comments.find_all().await?;

    let response: Vec<ModerationCommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// PATCH /comments/{id}/status - set the moderation status.
pub async fn update_status(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentStatusRequest>,
) -> AppResult<HttpResponse> {
    if !identity.has_role("admin") {
        return Err(AppError::Forbidden);
    }

    let id = path.into_inner();
    let status = body.into_inner().status;

    let updated = state.comments.update_status(id, status).await?;

    tracing::info!(comment_id = %id, status = %status, "Comment status updated");
    Ok(HttpResponse::Ok().json(CommentResponse::from(updated)))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use uuid::Uuid;

    use quill_core::domain::{Comment, CommentStatus};

    use crate::handlers::testing::{TestContext, auth_header};

    #[actix_web::test]
    async fn guest_comment_is_created_pending_without_author() {
        let ctx = TestContext::new();
        let app = ctx.app().await;

        let req = test::TestRequest::post()
            .uri("/comments")
            .set_json(serde_json::json!({
                "content": "nice!",
                "postId": Uuid::new_v4(),
            }))
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let stored = ctx.comments.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, CommentStatus::Pending);
        assert!(stored[0].author_id.is_none());
    }

    #[actix_web::test]
    async fn blank_comment_content_is_a_bad_request() {
        let ctx = TestContext::new();
        let app = ctx.app().await;

        let req = test::TestRequest::post()
            .uri("/comments")
            .set_json(serde_json::json!({
                "content": "   ",
                "postId": Uuid::new_v4(),
            }))
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(ctx.comments.all().is_empty());
    }

    #[actix_web::test]
    async fn authenticated_comment_takes_author_from_token() {
        let ctx = TestContext::new();
        let app = ctx.app().await;

        let req = test::TestRequest::post()
            .uri("/comments/auth")
            .insert_header(auth_header(&ctx, &["user"]))
            .set_json(serde_json::json!({
                "content": "great post",
                "postId": Uuid::new_v4(),
            }))
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let stored = ctx.comments.all();
        assert_eq!(stored[0].author_id, Some(ctx.user_id));
        assert_eq!(stored[0].status, CommentStatus::Pending);
    }

    #[actix_web::test]
    async fn unknown_status_value_is_rejected() {
        let ctx = TestContext::new();
        let app = ctx.app().await;

        let req = test::TestRequest::patch()
            .uri(&format!("/comments/{}/status", Uuid::new_v4()))
            .insert_header(auth_header(&ctx, &["admin"]))
            .set_json(serde_json::json!({"status": "BOGUS"}))
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_status_requires_admin_role() {
        let ctx = TestContext::new();
        let comment = Comment::new(Uuid::new_v4(), "hm".to_string(), None, None, None);
        let comment_id = comment.id;
        ctx.comments.insert(comment);
        let app = ctx.app().await;

        let req = test::TestRequest::patch()
            .uri(&format!("/comments/{}/status", comment_id))
            .insert_header(auth_header(&ctx, &["user"]))
            .set_json(serde_json::json!({"status": "APPROVED"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::patch()
            .uri(&format!("/comments/{}/status", comment_id))
            .insert_header(auth_header(&ctx, &["admin"]))
            .set_json(serde_json::json!({"status": "APPROVED"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        assert_eq!(ctx.comments.all()[0].status, CommentStatus::Approved);
    }

    #[actix_web::test]
    async fn admin_listing_requires_token() {
        let ctx = TestContext::new();
        let app = ctx.app().await;

        let req = test::TestRequest::get()
            .uri("/admin/comments")
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn public_listing_only_returns_approved_comments() {
        let ctx = TestContext::new();
        let post_id = Uuid::new_v4();

        let pending = Comment::new(post_id, "pending".to_string(), None, None, None);
        let mut approved = Comment::new(post_id, "approved".to_string(), None, None, None);
        approved.status = CommentStatus::Approved;
        ctx.comments.insert(pending);
        ctx.comments.insert(approved);

        let app = ctx.app().await;

        let req = test::TestRequest::get()
            .uri(&format!("/posts/{}/comments", post_id))
            .to_request();
        let body: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["content"], "approved");
        assert_eq!(body[0]["status"], "APPROVED");
    }
}
