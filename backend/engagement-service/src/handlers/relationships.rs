use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::handlers::PageQuery;
use crate::middleware::UserId;
use crate::models::ProfileSummary;

#[derive(Serialize)]
struct FollowResponse {
    status: String,
    follower_count: i64,
    following_count: i64,
}

#[derive(Serialize)]
struct UserListResponse {
    users: Vec<ProfileSummary>,
    count: usize,
}

/// POST /api/v1/users/{id}/follow
pub async fn follow_user(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let target_id = path.into_inner();
    let outcome = state.relationships.follow(user.0, target_id).await?;
    Ok(HttpResponse::Ok().json(FollowResponse {
        status: "ok".into(),
        follower_count: outcome.follower_count,
        following_count: outcome.following_count,
    }))
}

/// DELETE /api/v1/users/{id}/follow
pub async fn unfollow_user(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let target_id = path.into_inner();
    let outcome = state.relationships.unfollow(user.0, target_id).await?;
    Ok(HttpResponse::Ok().json(FollowResponse {
        status: "ok".into(),
        follower_count: outcome.follower_count,
        following_count: outcome.following_count,
    }))
}

/// GET /api/v1/users/{id}/followers
pub async fn get_followers(
    path: web::Path<Uuid>,
    q: web::Query<PageQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = state
        .relationships
        .list_followers(path.into_inner(), q.limit(), q.offset())
        .await?;
    let count = users.len();
    Ok(HttpResponse::Ok().json(UserListResponse { users, count }))
}

/// GET /api/v1/users/{id}/following
pub async fn get_following(
    path: web::Path<Uuid>,
    q: web::Query<PageQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = state
        .relationships
        .list_following(path.into_inner(), q.limit(), q.offset())
        .await?;
    let count = users.len();
    Ok(HttpResponse::Ok().json(UserListResponse { users, count }))
}

/// GET /api/v1/users/{id}/follow-status
pub async fn follow_status(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let target_id = path.into_inner();
    let following = state.relationships.is_following(user.0, target_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": user.0,
        "target_id": target_id,
        "following": following,
    })))
}

/// GET /api/v1/users/{id}/relationship-counts
pub async fn relationship_counts(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let counts = state.relationships.counts(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(counts))
}
