//! 핸들러 테스트용 앱 조립

use crate::core::registry::{ServiceRegistry, ServiceSettings};
use crate::services::payments::WebhookSignatureVerifier;

/// 레지스트리의 서비스와 전체 라우트로 테스트 앱을 만듭니다.
macro_rules! init_app {
    ($registry:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| $registry.configure_app_data(cfg))
                .configure($crate::routes::configure_all_routes),
        )
        .await
    };
}

pub const WEBHOOK_SECRET: &str = "whsec_test";
pub const ADMIN_EMAIL: &str = "admin@example.com";

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        bcrypt_cost: 4,
        jwt_secret: "handler-test-secret".to_string(),
        access_ttl_seconds: 3600,
        refresh_ttl_seconds: 86400,
        webhook_verifier: WebhookSignatureVerifier::new(
            WEBHOOK_SECRET.to_string(),
            "X-Webhook-Signature".to_string(),
            300,
        ),
    }
}

pub fn test_registry() -> ServiceRegistry {
    ServiceRegistry::in_memory_with_settings(test_settings())
}

/// 인증 헤더 값 (`Bearer {access_token}`)
pub async fn bearer(registry: &ServiceRegistry, user_id: &str, roles: &[String]) -> String {
    let pair = registry
        .token_service
        .issue_token_pair(user_id, roles)
        .await
        .unwrap();
    format!("Bearer {}", pair.access_token)
}

pub async fn admin_bearer(registry: &ServiceRegistry) -> String {
    bearer(
        registry,
        "64b7f0c2a1b2c3d4e5f60001",
        &["user".to_string(), "admin".to_string()],
    )
    .await
}

pub async fn user_bearer(registry: &ServiceRegistry) -> String {
    bearer(registry, "64b7f0c2a1b2c3d4e5f60002", &["user".to_string()]).await
}
