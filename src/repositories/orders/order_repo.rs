//! # 주문 리포지토리
//!
//! `orders` 컬렉션: customer_id, owner_id, created_at(desc)

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use tokio::sync::RwLock;
use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::orders::order::Order,
};
use crate::errors::errors::{AppError, AppResult};

/// 주문 목록 조회 조건
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub customer_id: Option<i64>,
    /// 주문을 만든 사용자
    pub owner_id: Option<String>,
}

impl OrderFilter {
    fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(customer_id) = self.customer_id {
            filter.insert("customer_id", customer_id);
        }
        if let Some(owner_id) = &self.owner_id {
            filter.insert("owner_id", owner_id.as_str());
        }
        filter
    }

    fn matches(&self, order: &Order) -> bool {
        let customer_ok = self.customer_id.is_none_or(|c| order.customer_id == c);
        let owner_ok = self
            .owner_id
            .as_deref()
            .is_none_or(|owner| order.owner_id.as_deref() == Some(owner));
        customer_ok && owner_ok
    }
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Order>>;

    async fn create(&self, order: Order) -> AppResult<Order>;

    /// id 기준 단일 문서 교체. 존재하지 않으면 `NotFound`
    async fn update(&self, order: &Order) -> AppResult<()>;

    /// 최신순 페이지 조회. (항목, 전체 개수)
    async fn find_page(&self, filter: &OrderFilter, skip: u64, limit: u64) -> AppResult<(Vec<Order>, u64)>;
}

pub struct MongoOrderRepository {
    db: Arc<Database>,
}

impl MongoOrderRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Order> {
        self.db.get_database().collection::<Order>("orders")
    }
}

#[async_trait]
impl Repository for MongoOrderRepository {
    fn name(&self) -> &str {
        "order"
    }

    fn collection_name(&self) -> &str {
        "orders"
    }

    async fn init(&self) -> AppResult<()> {
        let customer_index = IndexModel::builder()
            .keys(doc! { "customer_id": 1 })
            .options(IndexOptions::builder()
                .name("customer_id".to_string())
                .build())
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(IndexOptions::builder()
                .name("owner_id".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([customer_index, owner_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Order>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut order: Order) -> AppResult<Order> {
        let result = self.collection()
            .insert_one(&order)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        order.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("생성된 주문 ID를 확인할 수 없습니다".to_string())
        })?);

        Ok(order)
    }

    async fn update(&self, order: &Order) -> AppResult<()> {
        let id = order.id.ok_or_else(|| AppError::ValidationError("주문 ID가 없습니다".to_string()))?;

        let result = self.collection()
            .replace_one(doc! { "_id": id }, order)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("주문을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    async fn find_page(&self, filter: &OrderFilter, skip: u64, limit: u64) -> AppResult<(Vec<Order>, u64)> {
        let collection = self.collection();
        let filter = filter.to_document();

        let total = collection
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let items = collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((items, total))
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<ObjectId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryOrderRepository {
    fn name(&self) -> &str {
        "order"
    }

    fn collection_name(&self) -> &str {
        "orders"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Order>> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn create(&self, mut order: Order) -> AppResult<Order> {
        let id = ObjectId::new();
        order.id = Some(id);
        self.orders.write().await.insert(id, order.clone());
        Ok(order)
    }

    async fn update(&self, order: &Order) -> AppResult<()> {
        let id = order.id.ok_or_else(|| AppError::ValidationError("주문 ID가 없습니다".to_string()))?;
        let mut orders = self.orders.write().await;

        match orders.get_mut(&id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("주문을 찾을 수 없습니다".to_string())),
        }
    }

    async fn find_page(&self, filter: &OrderFilter, skip: u64, limit: u64) -> AppResult<(Vec<Order>, u64)> {
        let orders = self.orders.read().await;

        let mut matched: Vec<Order> = orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::orders::order::{OrderItem, OrderStatus};
    use rust_decimal_macros::dec;

    fn order(customer_id: i64) -> Order {
        let item = OrderItem::new(ObjectId::new(), None, "Mug".to_string(), None, 2, dec!(5.00));
        Order::new(customer_id, vec![item])
    }

    #[actix_web::test]
    async fn test_in_memory_update_replaces_row() {
        let repo = InMemoryOrderRepository::new();
        let mut created = repo.create(order(1)).await.unwrap();

        created.transition_to(OrderStatus::Cancelled).unwrap();
        repo.update(&created).await.unwrap();

        let stored = repo.find_by_id(&created.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Cancelled);
    }

    #[actix_web::test]
    async fn test_in_memory_update_missing_order() {
        let repo = InMemoryOrderRepository::new();
        let mut ghost = order(1);
        ghost.id = Some(ObjectId::new());

        assert!(matches!(repo.update(&ghost).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_in_memory_page_filters_by_customer() {
        let repo = InMemoryOrderRepository::new();
        repo.create(order(1)).await.unwrap();
        repo.create(order(1)).await.unwrap();
        repo.create(order(2)).await.unwrap();

        let by_customer = OrderFilter { customer_id: Some(1), ..Default::default() };
        let (items, total) = repo.find_page(&by_customer, 0, 1).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items.len(), 1);

        let (_, all) = repo.find_page(&OrderFilter::default(), 0, 10).await.unwrap();
        assert_eq!(all, 3);
    }

    #[actix_web::test]
    async fn test_in_memory_page_filters_by_owner() {
        let repo = InMemoryOrderRepository::new();
        let mut mine = order(1);
        mine.owner_id = Some("user-a".to_string());
        repo.create(mine).await.unwrap();
        let mut theirs = order(1);
        theirs.owner_id = Some("user-b".to_string());
        repo.create(theirs).await.unwrap();
        repo.create(order(1)).await.unwrap();

        let filter = OrderFilter { owner_id: Some("user-a".to_string()), ..Default::default() };
        let (items, total) = repo.find_page(&filter, 0, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].owner_id.as_deref(), Some("user-a"));
    }
}
