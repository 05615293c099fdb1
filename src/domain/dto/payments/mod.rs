//! 결제 웹훅 요청/응답 DTO

pub mod webhook;

pub use webhook::{PaymentWebhookRequest, WebhookAckResponse, WebhookLogResponse};
