//! # 카테고리 리포지토리
//!
//! `categories` 컬렉션: name(unique)

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use tokio::sync::RwLock;
use crate::{
    core::registry::Repository,
    db::{is_duplicate_key_error, Database},
    domain::entities::catalog::category::Category,
};
use crate::errors::errors::{AppError, AppResult};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    /// 이름순 페이지 조회. (항목, 전체 개수)
    async fn find_page(&self, skip: u64, limit: u64) -> AppResult<(Vec<Category>, u64)>;

    /// 이름이 중복되면 `ConflictError`
    async fn create(&self, category: Category) -> AppResult<Category>;

    /// 존재하지 않으면 `NotFound`, 이름이 중복되면 `ConflictError`
    async fn update(&self, category: &Category) -> AppResult<()>;

    /// 삭제되었으면 true
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
}

fn duplicate_name_error() -> AppError {
    AppError::ConflictError("이미 존재하는 카테고리 이름입니다".to_string())
}

pub struct MongoCategoryRepository {
    db: Arc<Database>,
}

impl MongoCategoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> mongodb::Collection<Category> {
        self.db.get_database().collection::<Category>("categories")
    }

    fn map_write_error(e: mongodb::error::Error) -> AppError {
        if is_duplicate_key_error(&e) {
            duplicate_name_error()
        } else {
            AppError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl Repository for MongoCategoryRepository {
    fn name(&self) -> &str {
        "category"
    }

    fn collection_name(&self) -> &str {
        "categories"
    }

    async fn init(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_index(name_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        self.collection()
            .find_one(doc! { "name": name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_page(&self, skip: u64, limit: u64) -> AppResult<(Vec<Category>, u64)> {
        let collection = self.collection();

        let total = collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let items = collection
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .skip(skip)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((items, total))
    }

    async fn create(&self, mut category: Category) -> AppResult<Category> {
        let result = self.collection()
            .insert_one(&category)
            .await
            .map_err(Self::map_write_error)?;

        category.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("생성된 카테고리 ID를 확인할 수 없습니다".to_string())
        })?);

        Ok(category)
    }

    async fn update(&self, category: &Category) -> AppResult<()> {
        let id = category.id.ok_or_else(|| AppError::ValidationError("카테고리 ID가 없습니다".to_string()))?;

        let result = self.collection()
            .replace_one(doc! { "_id": id }, category)
            .await
            .map_err(Self::map_write_error)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()));
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
pub struct InMemoryCategoryRepository {
    categories: RwLock<HashMap<ObjectId, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryCategoryRepository {
    fn name(&self) -> &str {
        "category"
    }

    fn collection_name(&self) -> &str {
        "categories"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        Ok(self.categories.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    async fn find_page(&self, skip: u64, limit: u64) -> AppResult<(Vec<Category>, u64)> {
        let categories = self.categories.read().await;

        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));

        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Ok((items, total))
    }

    async fn create(&self, mut category: Category) -> AppResult<Category> {
        let mut categories = self.categories.write().await;

        if categories.values().any(|c| c.name == category.name) {
            return Err(duplicate_name_error());
        }

        let id = ObjectId::new();
        category.id = Some(id);
        categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> AppResult<()> {
        let id = category.id.ok_or_else(|| AppError::ValidationError("카테고리 ID가 없습니다".to_string()))?;
        let mut categories = self.categories.write().await;

        if categories.values().any(|c| c.name == category.name && c.id != Some(id)) {
            return Err(duplicate_name_error());
        }

        match categories.get_mut(&id) {
            Some(existing) => {
                *existing = category.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string())),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        Ok(self.categories.write().await.remove(id).is_some())
    }
}
