//! # 상품 리포지토리
//!
//! `products` 컬렉션: category_id, created_at(desc)
//! 상품 옵션은 상품 문서에 내장되어 함께 저장됩니다.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId, Document}, options::IndexOptions, IndexModel};
use tokio::sync::RwLock;
use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::catalog::product::Product,
};
use crate::errors::errors::{AppError, AppResult};

/// 상품 목록 조회 조건
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category_id: Option<ObjectId>,
    /// 판매 중인 상품만 조회
    pub active_only: bool,
}

impl ProductFilter {
    fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(category_id) = self.category_id {
            filter.insert("category_id", category_id);
        }
        if self.active_only {
            filter.insert("is_active", true);
        }
        filter
    }

    fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category_id
            .is_none_or(|id| product.category_id == Some(id));
        category_ok && (!self.active_only || product.is_active)
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>>;

    /// 최신순 페이지 조회. (항목, 전체 개수)
    async fn find_page(&self, filter: ProductFilter, skip: u64, limit: u64) -> AppResult<(Vec<Product>, u64)>;

    /// 카테고리를 참조하는 상품 수
    async fn count_by_category(&self, category_id: &ObjectId) -> AppResult<u64>;

    async fn create(&self, product: Product) -> AppResult<Product>;

    /// 존재하지 않으면 `NotFound`
    async fn update(&self, product: &Product) -> AppResult<()>;

    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
}

pub struct MongoProductRepository {
    db: Arc<Database>,
}

impl MongoProductRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Product> {
        self.db.get_database().collection::<Product>("products")
    }
}

#[async_trait]
impl Repository for MongoProductRepository {
    fn name(&self) -> &str {
        "product"
    }

    fn collection_name(&self) -> &str {
        "products"
    }

    async fn init(&self) -> AppResult<()> {
        let category_index = IndexModel::builder()
            .keys(doc! { "category_id": 1 })
            .options(IndexOptions::builder()
                .name("category_id".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([category_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_page(&self, filter: ProductFilter, skip: u64, limit: u64) -> AppResult<(Vec<Product>, u64)> {
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

    async fn count_by_category(&self, category_id: &ObjectId) -> AppResult<u64> {
        self.collection()
            .count_documents(doc! { "category_id": *category_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut product: Product) -> AppResult<Product> {
        let result = self.collection()
            .insert_one(&product)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        product.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("생성된 상품 ID를 확인할 수 없습니다".to_string())
        })?);

        Ok(product)
    }

    async fn update(&self, product: &Product) -> AppResult<()> {
        let id = product.id.ok_or_else(|| AppError::ValidationError("상품 ID가 없습니다".to_string()))?;

        let result = self.collection()
            .replace_one(doc! { "_id": id }, product)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ObjectId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryProductRepository {
    fn name(&self) -> &str {
        "product"
    }

    fn collection_name(&self) -> &str {
        "products"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn find_page(&self, filter: ProductFilter, skip: u64, limit: u64) -> AppResult<(Vec<Product>, u64)> {
        let products = self.products.read().await;

        let mut matched: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        // ObjectId는 생성 시각 순으로 증가하므로 같은 밀리초 안에서도 순서가 유지됩니다.
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Ok((items, total))
    }

    async fn count_by_category(&self, category_id: &ObjectId) -> AppResult<u64> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.category_id.as_ref() == Some(category_id))
            .count() as u64)
    }

    async fn create(&self, mut product: Product) -> AppResult<Product> {
        let id = ObjectId::new();
        product.id = Some(id);
        self.products.write().await.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> AppResult<()> {
        let id = product.id.ok_or_else(|| AppError::ValidationError("상품 ID가 없습니다".to_string()))?;
        let mut products = self.products.write().await;

        match products.get_mut(&id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string())),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(self.products.write().await.remove(id).is_some())
    }
}
