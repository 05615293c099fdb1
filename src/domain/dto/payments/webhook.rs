use serde::{Deserialize, Serialize};

use crate::domain::entities::orders::webhook_log::WebhookLog;
use crate::utils::string_utils::format_datetime;

/// 결제 대행사가 보내는 웹훅 본문
///
/// ```json
/// {
///   "order_id": "64b7f0c2a1b2c3d4e5f60718",
///   "transaction_id": "txn_20240101_0001",
///   "payment_status": "paid",
///   "timestamp": 1704067200
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentWebhookRequest {
    pub order_id: String,
    pub transaction_id: String,
    pub payment_status: String,
    /// 이벤트 발생 시각 (Unix seconds)
    pub timestamp: i64,
}

/// 웹훅 처리 결과 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAckResponse {
    /// `processed` 또는 `duplicate`
    pub status: String,
    pub transaction_id: String,
}

impl WebhookAckResponse {
    pub fn processed(transaction_id: String) -> Self {
        Self {
            status: "processed".to_string(),
            transaction_id,
        }
    }

    pub fn duplicate(transaction_id: String) -> Self {
        Self {
            status: "duplicate".to_string(),
            transaction_id,
        }
    }
}

/// 결제 이력 응답 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookLogResponse {
    pub id: String,
    pub order_id: String,
    pub transaction_id: String,
    pub payment_status: String,
    pub status: String,
    pub retry_count: i32,
    pub next_retry_at: Option<String>,
    pub payload: String,
    pub processed_at: Option<String>,
    pub created_at: String,
}

impl From<WebhookLog> for WebhookLogResponse {
    fn from(log: WebhookLog) -> Self {
        Self {
            id: log.id_string().unwrap_or_default(),
            order_id: log.order_id,
            transaction_id: log.transaction_id,
            payment_status: log.payment_status.as_str().to_string(),
            status: log.status.as_str().to_string(),
            retry_count: log.retry_count,
            next_retry_at: log.next_retry_at.as_ref().map(format_datetime),
            payload: log.payload,
            processed_at: log.processed_at.as_ref().map(format_datetime),
            created_at: format_datetime(&log.created_at),
        }
    }
}
