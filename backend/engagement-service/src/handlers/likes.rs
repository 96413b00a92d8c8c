use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::handlers::PageQuery;
use crate::middleware::UserId;
use crate::models::ProfileSummary;

#[derive(Serialize)]
struct LikeStatusResponse {
    post_id: Uuid,
    user_id: Uuid,
    liked: bool,
    like_count: i64,
}

#[derive(Serialize)]
struct LikerListResponse {
    users: Vec<ProfileSummary>,
    count: usize,
}

/// POST /api/v1/posts/{post_id}/like
///
/// Toggle semantics: repeated calls alternate between liked and not liked.
pub async fn toggle_like(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let status = state.engagement.toggle_like(post_id, user.0).await?;
    Ok(HttpResponse::Ok().json(LikeStatusResponse {
        post_id,
        user_id: user.0,
        liked: status.liked,
        like_count: status.like_count,
    }))
}

/// GET /api/v1/posts/{post_id}/like-status
pub async fn like_status(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let status = state.engagement.check_liked(post_id, user.0).await?;
    Ok(HttpResponse::Ok().json(LikeStatusResponse {
        post_id,
        user_id: user.0,
        liked: status.liked,
        like_count: status.like_count,
    }))
}

/// GET /api/v1/posts/{post_id}/likes
pub async fn get_post_likes(
    path: web::Path<Uuid>,
    q: web::Query<PageQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = state
        .engagement
        .list_likers(path.into_inner(), q.limit(), q.offset())
        .await?;
    let count = users.len();
    Ok(HttpResponse::Ok().json(LikerListResponse { users, count }))
}
