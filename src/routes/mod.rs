//! API 라우트 설정 모듈
//!
//! 스코프마다 요구하는 인증 수준이 다릅니다.
//!
//! | 스코프 | 인증 |
//! |--------|------|
//! | `/health`, `/api/v1/users`, `/api/v1/categories`, `/api/v1/products` | 없음 |
//! | `/api/v1/auth` | 로그인/갱신은 없음, 로그아웃은 액세스 토큰 |
//! | `/api/v1/payment-webhook` | HMAC 서명 (핸들러에서 검증) |
//! | `/api/v1/me`, `/api/v1/orders` | 액세스 토큰 (`user` 또는 `admin`) |
//! | `/api/v1/admin` | 액세스 토큰 + `admin` 역할 |
//!
//! 서로 겹치는 접두사를 가진 스코프는 먼저 등록된 쪽이 요청을 가져가므로
//! 스코프 경로가 겹치지 않도록 구성합니다.

use actix_web::web;
use crate::domain::entities::users::user::{ROLE_ADMIN, ROLE_USER};
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// ```rust,ignore
/// App::new()
///     .configure(|cfg| registry.configure_app_data(cfg))
///     .configure(configure_all_routes)
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health::health_check);

    configure_user_routes(cfg);
    configure_auth_routes(cfg);
    configure_catalog_routes(cfg);
    configure_order_routes(cfg);
    configure_payment_routes(cfg);
    configure_admin_routes(cfg);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::create_user)
    );

    cfg.service(
        web::scope("/api/v1/me")
            .wrap(AuthMiddleware::required_with_roles(vec![ROLE_USER, ROLE_ADMIN]))
            .service(handlers::users::get_current_user)
    );
}

/// 로그인과 토큰 갱신은 공개, 로그아웃만 액세스 토큰을 요구합니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"Password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_tokens)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::auth::logout)
            )
    );
}

fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/categories")
            .service(handlers::categories::list_categories)
            .service(handlers::categories::get_category)
    );

    cfg.service(
        web::scope("/api/v1/products")
            .service(handlers::products::list_products)
            .service(handlers::products::get_product)
    );
}

fn configure_order_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/orders")
            .wrap(AuthMiddleware::required_with_roles(vec![ROLE_USER, ROLE_ADMIN]))
            .service(handlers::orders::create_order)
            .service(handlers::orders::list_orders)
            .service(handlers::orders::get_payment_history)
            .service(handlers::orders::cancel_order)
            .service(handlers::orders::get_order)
    );
}

/// 결제 대행사 콜백. 인증은 JWT가 아니라 본문 서명으로 합니다.
///
/// ```bash
/// BODY='{"order_id":"64b7f0c2a1b2c3d4e5f60718","transaction_id":"txn_1","payment_status":"paid","timestamp":1704067200}'
/// SIG=$(printf '%s' "$BODY" | openssl dgst -sha256 -hmac "$PAYMENT_WEBHOOK_SECRET" -hex | cut -d' ' -f2)
/// curl -X POST http://localhost:8080/api/v1/payment-webhook \
///   -H "Content-Type: application/json" -H "X-Webhook-Signature: $SIG" -d "$BODY"
/// ```
fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payment-webhook")
            .service(handlers::payments::receive_payment_webhook)
    );
}

/// 관리자 전용 라우트
fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(AuthMiddleware::required_with_role(ROLE_ADMIN))
            .service(
                web::scope("/categories")
                    .service(handlers::categories::create_category)
                    .service(handlers::categories::update_category)
                    .service(handlers::categories::delete_category)
            )
            .service(
                web::scope("/products")
                    .service(handlers::products::create_product)
                    .service(handlers::products::update_product)
                    .service(handlers::products::delete_product)
                    .service(handlers::products::add_variant)
                    .service(handlers::products::update_variant)
                    .service(handlers::products::remove_variant)
            )
            .service(
                web::scope("/orders")
                    .service(handlers::orders::update_order_status)
            )
    );
}
