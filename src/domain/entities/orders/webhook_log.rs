//! Webhook Log Entity
//!
//! 결제 웹훅 한 건의 처리 기록입니다. `transaction_id`는 저장소 수준에서 유일하며,
//! 같은 결제 이벤트가 다시 도착했을 때 중복 처리를 막는 기준이 됩니다.
//!
//! ```text
//! processing ──► completed          (주문 저장 성공)
//!      │
//!      └───────► failed             (주문 저장 실패, retry_count + 1, 5분 뒤 재시도)
//! ```

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::order::PaymentStatus;

/// 주문 저장 실패 후 다음 재시도까지의 대기 시간 (밀리초)
pub const RETRY_DELAY_MILLIS: i64 = 5 * 60 * 1000;

/// 웹훅 처리 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl WebhookProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookProcessingStatus::Pending => "pending",
            WebhookProcessingStatus::Processing => "processing",
            WebhookProcessingStatus::Completed => "completed",
            WebhookProcessingStatus::Failed => "failed",
        }
    }
}

/// 웹훅 처리 기록
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 요청에 담겨 온 주문 ID 문자열
    pub order_id: String,
    /// 결제 이벤트 식별자 (unique)
    pub transaction_id: String,
    /// 결제 대행사가 보고한 결제 상태
    pub payment_status: PaymentStatus,
    pub status: WebhookProcessingStatus,
    pub retry_count: i32,
    pub next_retry_at: Option<DateTime>,
    /// 수신한 요청의 직렬화 사본
    pub payload: String,
    pub processed_at: Option<DateTime>,
    pub created_at: DateTime,
}

impl WebhookLog {
    /// 처리 중 상태의 새 로그를 만듭니다. 주문을 수정하기 전에 기록됩니다.
    pub fn processing(
        order_id: String,
        transaction_id: String,
        payment_status: PaymentStatus,
        payload: String,
    ) -> Self {
        Self {
            id: None,
            order_id,
            transaction_id,
            payment_status,
            status: WebhookProcessingStatus::Processing,
            retry_count: 0,
            next_retry_at: None,
            payload,
            processed_at: None,
            created_at: DateTime::now(),
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn mark_completed(&mut self) {
        self.status = WebhookProcessingStatus::Completed;
        self.processed_at = Some(DateTime::now());
    }

    /// 실패로 기록하고 다음 재시도 시각을 지금으로부터 5분 뒤로 잡습니다.
    pub fn mark_failed(&mut self) {
        let now = DateTime::now();
        self.status = WebhookProcessingStatus::Failed;
        self.retry_count += 1;
        self.next_retry_at = Some(DateTime::from_millis(
            now.timestamp_millis() + RETRY_DELAY_MILLIS,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> WebhookLog {
        WebhookLog::processing(
            ObjectId::new().to_hex(),
            "txn_001".to_string(),
            PaymentStatus::Paid,
            "{}".to_string(),
        )
    }

    #[test]
    fn test_processing_log_defaults() {
        let log = sample_log();
        assert_eq!(log.status, WebhookProcessingStatus::Processing);
        assert_eq!(log.retry_count, 0);
        assert!(log.next_retry_at.is_none());
        assert!(log.processed_at.is_none());
    }

    #[test]
    fn test_mark_completed_stamps_processed_at() {
        let mut log = sample_log();
        log.mark_completed();
        assert_eq!(log.status, WebhookProcessingStatus::Completed);
        assert!(log.processed_at.is_some());
        assert_eq!(log.retry_count, 0);
    }

    #[test]
    fn test_mark_failed_schedules_retry() {
        let mut log = sample_log();
        let before = DateTime::now().timestamp_millis();

        log.mark_failed();

        let after = DateTime::now().timestamp_millis();
        assert_eq!(log.status, WebhookProcessingStatus::Failed);
        assert_eq!(log.retry_count, 1);

        let next_retry = log.next_retry_at.map(|t| t.timestamp_millis()).unwrap_or_default();
        assert!(next_retry >= before + RETRY_DELAY_MILLIS);
        assert!(next_retry <= after + RETRY_DELAY_MILLIS);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&WebhookProcessingStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }
}
