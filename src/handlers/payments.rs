//! 결제 웹훅 수신 핸들러
//!
//! 본문은 서명 검증을 위해 원본 바이트 그대로 받습니다.
//!
//! ```text
//! POST /api/v1/payment-webhook
//!   ├─ 서명 헤더 없음 ────────────────► 401
//!   ├─ HMAC-SHA256(raw body) 불일치 ──► 401
//!   ├─ JSON 파싱 실패 ───────────────► 400
//!   ├─ |now - timestamp| > 허용 범위 ─► 401
//!   └─ PaymentWebhookService::process_webhook
//!         ├─ Processed ─► 200 {"status": "processed"}
//!         └─ Duplicate ─► 200 {"status": "duplicate"}
//! ```

use actix_web::{post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use crate::domain::dto::payments::{PaymentWebhookRequest, WebhookAckResponse};
use crate::errors::errors::AppError;
use crate::services::payments::{PaymentWebhookService, WebhookOutcome, WebhookSignatureVerifier};

#[post("")]
pub async fn receive_payment_webhook(
    req: HttpRequest,
    body: web::Bytes,
    verifier: web::Data<WebhookSignatureVerifier>,
    webhook_service: web::Data<PaymentWebhookService>,
) -> Result<HttpResponse, AppError> {
    let signature = req
        .headers()
        .get(verifier.signature_header())
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("웹훅 서명 헤더가 없습니다".to_string()))?;

    if !verifier.verify(&body, signature)? {
        log::warn!("🔒 웹훅 서명 불일치");
        return Err(AppError::AuthenticationError("웹훅 서명이 유효하지 않습니다".to_string()));
    }

    let payload: PaymentWebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::ValidationError(format!("웹훅 본문을 해석할 수 없습니다: {}", e)))?;

    if !verifier.verify_timestamp(payload.timestamp, Utc::now().timestamp()) {
        log::warn!(
            "🔒 웹훅 타임스탬프 범위 초과 - transaction_id: {}, timestamp: {}",
            payload.transaction_id, payload.timestamp
        );
        return Err(AppError::AuthenticationError("웹훅 타임스탬프가 허용 범위를 벗어났습니다".to_string()));
    }

    let response = match webhook_service.process_webhook(&payload).await? {
        WebhookOutcome::Processed(_) => WebhookAckResponse::processed(payload.transaction_id),
        WebhookOutcome::Duplicate => WebhookAckResponse::duplicate(payload.transaction_id),
    };

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use crate::core::registry::ServiceRegistry;
    use crate::domain::dto::catalog::CreateProductRequest;
    use crate::domain::dto::orders::{CreateOrderRequest, OrderItemRequest};
    use crate::handlers::test_support::{admin_bearer, test_registry};
    use crate::services::orders::OrderScope;

    async fn seed_pending_order(registry: &ServiceRegistry) -> String {
        let product = registry
            .product_service
            .create_product(CreateProductRequest {
                name: "Mug".to_string(),
                description: None,
                price: dec!(12.50),
                category_id: None,
                is_active: None,
                variants: vec![],
            })
            .await
            .unwrap();

        let order = registry
            .order_service
            .create_order(
                CreateOrderRequest {
                    customer_id: 7,
                    items: vec![OrderItemRequest {
                        product_id: product.id,
                        variant_id: None,
                        quantity: 2,
                    }],
                },
                None,
            )
            .await
            .unwrap();
        order.id
    }

    fn webhook_body(order_id: &str, transaction_id: &str, payment_status: &str, timestamp: i64) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "order_id": order_id,
            "transaction_id": transaction_id,
            "payment_status": payment_status,
            "timestamp": timestamp
        }))
        .unwrap()
    }

    fn signed_request(registry: &ServiceRegistry, body: Vec<u8>) -> test::TestRequest {
        let signature = registry.webhook_verifier.sign(&body).unwrap();
        test::TestRequest::post()
            .uri("/api/v1/payment-webhook")
            .insert_header(("Content-Type", "application/json"))
            .insert_header(("X-Webhook-Signature", signature))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_paid_webhook_completes_order_and_replay_is_duplicate() {
        let registry = test_registry();
        let app = init_app!(registry);
        let order_id = seed_pending_order(&registry).await;
        let body = webhook_body(&order_id, "txn_0001", "paid", Utc::now().timestamp());

        let ack: Value = test::call_and_read_body_json(&app, signed_request(&registry, body.clone()).to_request()).await;
        assert_eq!(ack, json!({ "status": "processed", "transaction_id": "txn_0001" }));

        let order = registry.order_service.get_order(&order_id, &OrderScope::All).await.unwrap();
        assert_eq!(order.status, "completed");
        assert_eq!(order.payment_status, "paid");

        let replay: Value = test::call_and_read_body_json(&app, signed_request(&registry, body).to_request()).await;
        assert_eq!(replay["status"], "duplicate");

        let admin = admin_bearer(&registry).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/orders/{}/payment-history", order_id))
            .insert_header(("Authorization", admin))
            .to_request();
        let history: Value = test::call_and_read_body_json(&app, req).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["status"], "completed");
        assert_eq!(history[0]["retry_count"], 0);
    }

    #[actix_web::test]
    async fn test_failed_payment_keeps_order_pending() {
        let registry = test_registry();
        let app = init_app!(registry);
        let order_id = seed_pending_order(&registry).await;
        let body = webhook_body(&order_id, "txn_fail", "failed", Utc::now().timestamp());

        let resp = test::call_service(&app, signed_request(&registry, body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let order = registry.order_service.get_order(&order_id, &OrderScope::All).await.unwrap();
        assert_eq!(order.status, "pending");
        assert_eq!(order.payment_status, "failed");
    }

    #[actix_web::test]
    async fn test_webhook_for_completed_order_is_conflict() {
        let registry = test_registry();
        let app = init_app!(registry);
        let order_id = seed_pending_order(&registry).await;
        let now = Utc::now().timestamp();

        let first = webhook_body(&order_id, "txn_a", "paid", now);
        assert_eq!(test::call_service(&app, signed_request(&registry, first).to_request()).await.status(), StatusCode::OK);

        let second = webhook_body(&order_id, "txn_b", "paid", now);
        let resp = test::call_service(&app, signed_request(&registry, second).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_signature_checks() {
        let registry = test_registry();
        let app = init_app!(registry);
        let order_id = seed_pending_order(&registry).await;
        let body = webhook_body(&order_id, "txn_sig", "paid", Utc::now().timestamp());

        let missing = test::TestRequest::post()
            .uri("/api/v1/payment-webhook")
            .set_payload(body.clone())
            .to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::UNAUTHORIZED);

        let forged = test::TestRequest::post()
            .uri("/api/v1/payment-webhook")
            .insert_header(("X-Webhook-Signature", "00".repeat(32)))
            .set_payload(body.clone())
            .to_request();
        assert_eq!(test::call_service(&app, forged).await.status(), StatusCode::UNAUTHORIZED);

        // 서명 이후 본문 변조
        let signature = registry.webhook_verifier.sign(&body).unwrap();
        let tampered = webhook_body(&order_id, "txn_sig", "failed", Utc::now().timestamp());
        let req = test::TestRequest::post()
            .uri("/api/v1/payment-webhook")
            .insert_header(("X-Webhook-Signature", signature))
            .set_payload(tampered)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let order = registry.order_service.get_order(&order_id, &OrderScope::All).await.unwrap();
        assert_eq!(order.payment_status, "unpaid");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let registry = test_registry();
        let app = init_app!(registry);

        let req = signed_request(&registry, b"{\"order_id\": ".to_vec()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_stale_timestamp_is_unauthorized() {
        let registry = test_registry();
        let app = init_app!(registry);
        let order_id = seed_pending_order(&registry).await;
        let body = webhook_body(&order_id, "txn_old", "paid", Utc::now().timestamp() - 301);

        let resp = test::call_service(&app, signed_request(&registry, body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let order = registry.order_service.get_order(&order_id, &OrderScope::All).await.unwrap();
        assert_eq!(order.status, "pending");
    }

    #[actix_web::test]
    async fn test_unknown_order_and_bad_status() {
        let registry = test_registry();
        let app = init_app!(registry);
        let now = Utc::now().timestamp();

        let unknown = webhook_body("64b7f0c2a1b2c3d4e5f60718", "txn_x", "paid", now);
        let resp = test::call_service(&app, signed_request(&registry, unknown).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let order_id = seed_pending_order(&registry).await;
        let refunded = webhook_body(&order_id, "txn_y", "refunded", now);
        let resp = test::call_service(&app, signed_request(&registry, refunded).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
