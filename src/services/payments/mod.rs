//! 결제 웹훅 서비스 모듈
//!
//! - [`signature`] - HTTP 경계에서 사용하는 HMAC-SHA256 서명/타임스탬프 검증
//! - [`payment_webhook_service`] - 멱등성 검사, 주문 결제 상태 반영, 웹훅 로그 기록

pub mod signature;
pub mod payment_webhook_service;

pub use signature::WebhookSignatureVerifier;
pub use payment_webhook_service::{PaymentWebhookService, WebhookOutcome};
