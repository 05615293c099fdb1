//! 주문과 결제 웹훅 로그 리포지토리
//!
//! 주문과 웹훅 로그는 id 기준 단일 문서 갱신으로만 수정됩니다.

pub mod order_repo;
pub mod webhook_log_repo;

pub use order_repo::{InMemoryOrderRepository, MongoOrderRepository, OrderFilter, OrderRepository};
pub use webhook_log_repo::{InMemoryWebhookLogRepository, MongoWebhookLogRepository, WebhookLogRepository};
