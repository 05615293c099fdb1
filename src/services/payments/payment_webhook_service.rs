//! # 결제 웹훅 처리 서비스
//!
//! 서명 검증을 통과한 결제 결과 통지를 주문에 반영합니다.
//!
//! ## 사전 조건 (이 순서로 검사)
//!
//! 1. `transaction_id`가 비어 있지 않음 → 아니면 `ValidationError`
//! 2. 같은 주문의 웹훅 로그 중 같은 `transaction_id`가 있으면 재전송으로 보고 아무것도 하지 않음
//!    (로그의 `order_id`는 ObjectId로 읽히면 소문자 hex 정규형으로 저장·조회합니다)
//! 3. `order_id`가 올바른 ObjectId → 아니면 `ValidationError`
//! 4. 주문이 존재 → 아니면 `NotFound`
//! 5. 주문 상태가 `pending` → 아니면 `InvalidState`
//! 6. 결제 상태가 정확히 `paid` 또는 `failed` → 아니면 `ValidationError`
//!
//! ## 처리
//!
//! ```text
//! 웹훅 로그 생성 (processing, payload 사본)
//!        │        └─ transaction_id 중복 → 재전송 (주문 변경 없음)
//!        ▼
//! 주문 결제 상태 반영 (paid → completed)
//!        │
//!   주문 저장 ──성공──► 로그 completed, processed_at 기록
//!        │
//!        └──실패──► 로그 failed, retry_count + 1, 5분 뒤 재시도 → PersistenceError
//! ```
//!
//! 로그 갱신은 최선 노력입니다. 갱신 자체가 실패해도 에러 로그만 남기고
//! 주문 저장 결과를 그대로 돌려줍니다. 자체 재시도는 하지 않습니다.

use std::sync::Arc;
use crate::{
    domain::{
        dto::payments::{PaymentWebhookRequest, WebhookLogResponse},
        entities::orders::{
            order::{OrderStatus, PaymentStatus},
            webhook_log::WebhookLog,
        },
    },
    repositories::orders::{OrderRepository, WebhookLogRepository},
    utils::string_utils::parse_object_id,
};
use crate::errors::errors::{AppError, AppResult, ErrorContext};

/// 웹훅 처리 결과
#[derive(Debug)]
pub enum WebhookOutcome {
    /// 주문에 반영됨. 완료 처리된 로그를 담습니다.
    Processed(WebhookLog),
    /// 이미 처리된 거래. 아무 것도 바뀌지 않았습니다.
    Duplicate,
}

pub struct PaymentWebhookService {
    order_repo: Arc<dyn OrderRepository>,
    webhook_log_repo: Arc<dyn WebhookLogRepository>,
}

impl PaymentWebhookService {
    pub fn new(order_repo: Arc<dyn OrderRepository>, webhook_log_repo: Arc<dyn WebhookLogRepository>) -> Self {
        Self { order_repo, webhook_log_repo }
    }

    pub async fn process_webhook(&self, request: &PaymentWebhookRequest) -> AppResult<WebhookOutcome> {
        let transaction_id = request.transaction_id.as_str();
        if transaction_id.trim().is_empty() {
            return Err(AppError::ValidationError("transaction_id는 필수입니다".to_string()));
        }

        let log_key = order_log_key(&request.order_id);
        let history = self.webhook_log_repo.find_by_order_id(&log_key).await?;
        if history.iter().any(|log| log.transaction_id == transaction_id) {
            log::info!("🔁 이미 처리된 웹훅 - order_id: {}, transaction_id: {}", request.order_id, transaction_id);
            return Ok(WebhookOutcome::Duplicate);
        }

        let order_id = parse_object_id(&request.order_id, "order_id")?;

        let mut order = self
            .order_repo
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("주문을 찾을 수 없습니다: {}", request.order_id)))?;

        if order.status != OrderStatus::Pending {
            log::warn!(
                "⚠️ 결제 웹훅 거절 - order_id: {}, 현재 상태: {}, transaction_id: {}",
                request.order_id, order.status, transaction_id
            );
            return Err(AppError::InvalidState(format!(
                "대기 중인 주문만 결제 결과를 반영할 수 있습니다 (현재 상태: {})",
                order.status
            )));
        }

        let payment_status = PaymentStatus::from_webhook_value(&request.payment_status).ok_or_else(|| {
            AppError::ValidationError(format!("알 수 없는 결제 상태입니다: {}", request.payment_status))
        })?;

        let payload = serde_json::to_string(request).context("웹훅 payload 직렬화 실패")?;

        let pending_log = WebhookLog::processing(
            log_key,
            transaction_id.to_string(),
            payment_status,
            payload,
        );

        let mut webhook_log = match self.webhook_log_repo.create(pending_log).await {
            Ok(created) => created,
            Err(AppError::ConflictError(_)) => {
                log::info!("🔁 동시에 도착한 같은 거래 - transaction_id: {}", transaction_id);
                return Ok(WebhookOutcome::Duplicate);
            }
            Err(e) => return Err(e),
        };

        order.apply_payment_result(payment_status);

        match self.order_repo.update(&order).await {
            Ok(()) => {
                webhook_log.mark_completed();
                self.save_log_best_effort(&webhook_log).await;

                log::info!(
                    "💳 결제 웹훅 처리 완료 - order_id: {}, transaction_id: {}, payment: {}, order: {}",
                    request.order_id, transaction_id, payment_status, order.status
                );
                Ok(WebhookOutcome::Processed(webhook_log))
            }
            Err(e) => {
                log::error!(
                    "❌ 주문 저장 실패 - order_id: {}, transaction_id: {}, 에러: {}",
                    request.order_id, transaction_id, e
                );

                webhook_log.mark_failed();
                self.save_log_best_effort(&webhook_log).await;

                Err(AppError::PersistenceError(format!("주문 결제 상태 저장 실패: {}", e)))
            }
        }
    }

    async fn save_log_best_effort(&self, webhook_log: &WebhookLog) {
        if let Err(e) = self.webhook_log_repo.update(webhook_log).await {
            log::error!(
                "❌ 웹훅 로그 갱신 실패 - transaction_id: {}, 상태: {}, 에러: {}",
                webhook_log.transaction_id,
                webhook_log.status.as_str(),
                e
            );
        }
    }

    /// 주문의 웹훅 처리 이력 (최신순)
    pub async fn get_webhook_history(&self, order_id: &str) -> AppResult<Vec<WebhookLogResponse>> {
        let logs = self.webhook_log_repo.find_by_order_id(&order_log_key(order_id)).await?;
        Ok(logs.into_iter().map(WebhookLogResponse::from).collect())
    }
}

/// 웹훅 로그의 주문 키
///
/// 대문자나 앞뒤 공백이 섞인 ID도 같은 주문의 이력으로 묶이도록 정규형을 씁니다.
/// ObjectId가 아니면 받은 문자열을 그대로 씁니다.
fn order_log_key(order_id: &str) -> String {
    parse_object_id(order_id, "order_id")
        .map(|id| id.to_hex())
        .unwrap_or_else(|_| order_id.to_string())
}
