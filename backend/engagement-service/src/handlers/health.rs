use actix_web::HttpResponse;

/// GET /api/v1/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "engagement-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/v1/health/ready
pub async fn readiness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ready" }))
}
