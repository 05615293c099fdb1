//! # 결제 웹훅 로그 리포지토리
//!
//! `webhook_logs` 컬렉션: transaction_id(unique), (order_id, created_at desc)
//!
//! `transaction_id` 유일 인덱스가 동시에 도착한 같은 결제 이벤트를 막는 최종 방어선입니다.
//! 인덱스 위반은 `ConflictError`로 돌려주며, 처리기는 이를 재전송으로 취급합니다.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use tokio::sync::RwLock;
use crate::{
    core::registry::Repository,
    db::{is_duplicate_key_error, Database},
    domain::entities::orders::webhook_log::WebhookLog,
};
use crate::errors::errors::{AppError, AppResult};

#[async_trait]
pub trait WebhookLogRepository: Send + Sync {
    /// 같은 `transaction_id`가 이미 있으면 `ConflictError`
    async fn create(&self, log: WebhookLog) -> AppResult<WebhookLog>;

    async fn update(&self, log: &WebhookLog) -> AppResult<()>;

    /// 주문의 웹훅 로그 전체, 최신순. 없으면 빈 목록
    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Vec<WebhookLog>>;
}

fn duplicate_transaction_error(transaction_id: &str) -> AppError {
    AppError::ConflictError(format!("이미 처리된 거래입니다: {}", transaction_id))
}

pub struct MongoWebhookLogRepository {
    db: Arc<Database>,
}

impl MongoWebhookLogRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<WebhookLog> {
        self.db.get_database().collection::<WebhookLog>("webhook_logs")
    }
}

#[async_trait]
impl Repository for MongoWebhookLogRepository {
    fn name(&self) -> &str {
        "webhook_log"
    }

    fn collection_name(&self) -> &str {
        "webhook_logs"
    }

    async fn init(&self) -> AppResult<()> {
        let transaction_index = IndexModel::builder()
            .keys(doc! { "transaction_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("transaction_id_unique".to_string())
                .build())
            .build();

        let order_index = IndexModel::builder()
            .keys(doc! { "order_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("order_id_created_at".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([transaction_index, order_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl WebhookLogRepository for MongoWebhookLogRepository {
    async fn create(&self, mut log: WebhookLog) -> AppResult<WebhookLog> {
        let result = self.collection()
            .insert_one(&log)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    duplicate_transaction_error(&log.transaction_id)
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        log.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("생성된 웹훅 로그 ID를 확인할 수 없습니다".to_string())
        })?);

        Ok(log)
    }

    async fn update(&self, log: &WebhookLog) -> AppResult<()> {
        let id = log.id.ok_or_else(|| AppError::ValidationError("웹훅 로그 ID가 없습니다".to_string()))?;

        let result = self.collection()
            .replace_one(doc! { "_id": id }, log)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("웹훅 로그를 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Vec<WebhookLog>> {
        self.collection()
            .find(doc! { "order_id": order_id })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryWebhookLogRepository {
    logs: RwLock<HashMap<ObjectId, WebhookLog>>,
}

impl InMemoryWebhookLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryWebhookLogRepository {
    fn name(&self) -> &str {
        "webhook_log"
    }

    fn collection_name(&self) -> &str {
        "webhook_logs"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl WebhookLogRepository for InMemoryWebhookLogRepository {
    async fn create(&self, mut log: WebhookLog) -> AppResult<WebhookLog> {
        let mut logs = self.logs.write().await;

        if logs.values().any(|l| l.transaction_id == log.transaction_id) {
            return Err(duplicate_transaction_error(&log.transaction_id));
        }

        let id = ObjectId::new();
        log.id = Some(id);
        logs.insert(id, log.clone());
        Ok(log)
    }

    async fn update(&self, log: &WebhookLog) -> AppResult<()> {
        let id = log.id.ok_or_else(|| AppError::ValidationError("웹훅 로그 ID가 없습니다".to_string()))?;
        let mut logs = self.logs.write().await;

        match logs.get_mut(&id) {
            Some(existing) => {
                *existing = log.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("웹훅 로그를 찾을 수 없습니다".to_string())),
        }
    }

    async fn find_by_order_id(&self, order_id: &str) -> AppResult<Vec<WebhookLog>> {
        let logs = self.logs.read().await;

        let mut matched: Vec<WebhookLog> = logs
            .values()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matched)
    }
}
