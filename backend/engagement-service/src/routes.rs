use actix_web::{web, HttpResponse};

use crate::handlers::{comments, health, likes, notifications, relationships};
use crate::metrics;
use crate::middleware::JwtAuthMiddleware;

async fn metrics_endpoint() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::gather_metrics())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics_endpoint));

    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health::health_check))
            .route("/health/ready", web::get().to(health::readiness_check))
            .service(
                web::scope("")
                    .wrap(JwtAuthMiddleware)
                    // relationship graph
                    .route(
                        "/users/{id}/follow",
                        web::post().to(relationships::follow_user),
                    )
                    .route(
                        "/users/{id}/follow",
                        web::delete().to(relationships::unfollow_user),
                    )
                    .route(
                        "/users/{id}/followers",
                        web::get().to(relationships::get_followers),
                    )
                    .route(
                        "/users/{id}/following",
                        web::get().to(relationships::get_following),
                    )
                    .route(
                        "/users/{id}/follow-status",
                        web::get().to(relationships::follow_status),
                    )
                    .route(
                        "/users/{id}/relationship-counts",
                        web::get().to(relationships::relationship_counts),
                    )
                    // likes
                    .route("/posts/{id}/like", web::post().to(likes::toggle_like))
                    .route("/posts/{id}/like-status", web::get().to(likes::like_status))
                    .route("/posts/{id}/likes", web::get().to(likes::get_post_likes))
                    // comments
                    .route(
                        "/posts/{id}/comments",
                        web::post().to(comments::create_comment),
                    )
                    .route(
                        "/posts/{id}/comments",
                        web::get().to(comments::list_comments),
                    )
                    .route(
                        "/comments/{id}",
                        web::put().to(comments::update_comment),
                    )
                    .route(
                        "/comments/{id}",
                        web::delete().to(comments::delete_comment),
                    )
                    // notifications
                    .route(
                        "/notifications",
                        web::get().to(notifications::list_notifications),
                    )
                    .route(
                        "/notifications/unread",
                        web::get().to(notifications::list_unread),
                    )
                    .route(
                        "/notifications/unread/count",
                        web::get().to(notifications::unread_count),
                    )
                    .route(
                        "/notifications/read-all",
                        web::put().to(notifications::mark_all_read),
                    )
                    .route(
                        "/notifications/{id}/read",
                        web::put().to(notifications::mark_read),
                    )
                    .route(
                        "/notifications/{id}",
                        web::delete().to(notifications::delete_notification),
                    ),
            ),
    );
}
