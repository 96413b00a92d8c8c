use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::handlers::PageQuery;
use crate::middleware::UserId;
use crate::models::Notification;

#[derive(Serialize)]
struct NotificationListResponse {
    notifications: Vec<Notification>,
    count: usize,
}

/// GET /api/v1/notifications
///
/// Listing marks every returned notification as viewed, so the badge
/// count drops to zero after the user opens their notification feed.
pub async fn list_notifications(
    q: web::Query<PageQuery>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let notifications = state
        .notifications
        .list(user.0, q.limit(), q.offset())
        .await?;
    let count = notifications.len();
    Ok(HttpResponse::Ok().json(NotificationListResponse {
        notifications,
        count,
    }))
}

/// GET /api/v1/notifications/unread
pub async fn list_unread(
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let notifications = state.notifications.list_unread(user.0).await?;
    let count = notifications.len();
    Ok(HttpResponse::Ok().json(NotificationListResponse {
        notifications,
        count,
    }))
}

/// GET /api/v1/notifications/unread/count
pub async fn unread_count(
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let count = state.notifications.unread_count(user.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "count": count })))
}

/// PUT /api/v1/notifications/{id}/read
pub async fn mark_read(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let notification = state
        .notifications
        .mark_read(path.into_inner(), user.0)
        .await?;
    Ok(HttpResponse::Ok().json(notification))
}

/// PUT /api/v1/notifications/read-all
pub async fn mark_all_read(
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let updated = state.notifications.mark_all_read(user.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "updated": updated })))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    state
        .notifications
        .delete(path.into_inner(), user.0)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
