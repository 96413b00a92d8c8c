use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::handlers::PageQuery;
use crate::middleware::UserId;
use crate::models::CommentView;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Serialize)]
struct CommentListResponse {
    comments: Vec<CommentView>,
    count: usize,
    limit: i64,
    offset: i64,
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn create_comment(
    path: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let view = state
        .engagement
        .add_comment(path.into_inner(), user.0, &req.content)
        .await?;
    Ok(HttpResponse::Created().json(view))
}

/// GET /api/v1/posts/{post_id}/comments
pub async fn list_comments(
    path: web::Path<Uuid>,
    q: web::Query<PageQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (limit, offset) = (q.limit(), q.offset());
    let comments = state
        .engagement
        .list_comments(path.into_inner(), limit, offset)
        .await?;
    let count = comments.len();
    Ok(HttpResponse::Ok().json(CommentListResponse {
        comments,
        count,
        limit,
        offset,
    }))
}

/// PUT /api/v1/comments/{comment_id}
pub async fn update_comment(
    path: web::Path<Uuid>,
    req: web::Json<UpdateCommentRequest>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let comment = state
        .engagement
        .edit_comment(path.into_inner(), user.0, &req.content)
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /api/v1/comments/{comment_id}
pub async fn delete_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let comment_count = state
        .engagement
        .delete_comment(path.into_inner(), user.0)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "deleted",
        "comment_count": comment_count,
    })))
}
