use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use crate::config::StorageBackend;

/// 서비스 상태 확인
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "commerce_service_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00+00:00",
///   "storage": "mongodb"
/// }
/// ```
#[get("/health")]
pub async fn health_check(backend: web::Data<StorageBackend>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "storage": backend.as_str(),
    }))
}
