//! 카테고리 관리 서비스
//!
//! 이름은 유일해야 하며, 상품이 참조 중인 카테고리는 삭제할 수 없습니다.

use std::sync::Arc;
use crate::{
    domain::{
        dto::{
            catalog::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
            PaginatedResponse,
        },
        entities::catalog::category::Category,
        models::pagination::Pagination,
    },
    repositories::catalog::{CategoryRepository, ProductRepository},
    utils::string_utils::{parse_object_id, validate_required_string},
};
use crate::errors::errors::{AppError, AppResult};

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepository>,
    product_repo: Arc<dyn ProductRepository>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>, product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { category_repo, product_repo }
    }

    async fn load(&self, id: &str) -> AppResult<Category> {
        let object_id = parse_object_id(id, "category_id")?;

        self.category_repo
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<CategoryResponse> {
        let name = validate_required_string(&request.name, "name")?;
        let created = self
            .category_repo
            .create(Category::new(name, request.description))
            .await?;

        log::info!("📁 카테고리 생성: {}", created.name);
        Ok(CategoryResponse::from(created))
    }

    pub async fn get_category(&self, id: &str) -> AppResult<CategoryResponse> {
        Ok(CategoryResponse::from(self.load(id).await?))
    }

    pub async fn list_categories(&self, pagination: Pagination) -> AppResult<PaginatedResponse<CategoryResponse>> {
        let (items, total) = self
            .category_repo
            .find_page(pagination.skip(), pagination.limit())
            .await?;

        Ok(PaginatedResponse::new(items, pagination, total).map(CategoryResponse::from))
    }

    /// 주어진 필드만 수정합니다.
    pub async fn update_category(&self, id: &str, request: UpdateCategoryRequest) -> AppResult<CategoryResponse> {
        let mut category = self.load(id).await?;

        if let Some(name) = request.name {
            category.name = validate_required_string(&name, "name")?;
        }
        if let Some(description) = request.description {
            category.description = Some(description);
        }
        category.touch();

        self.category_repo.update(&category).await?;
        Ok(CategoryResponse::from(category))
    }

    /// # Errors
    ///
    /// * `AppError::ConflictError` - 상품이 아직 이 카테고리를 참조함
    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id, "category_id")?;

        let referenced_by = self.product_repo.count_by_category(&object_id).await?;
        if referenced_by > 0 {
            return Err(AppError::ConflictError(format!(
                "{}개의 상품이 참조 중인 카테고리는 삭제할 수 없습니다",
                referenced_by
            )));
        }

        if !self.category_repo.delete(&object_id).await? {
            return Err(AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()));
        }

        log::info!("🗑️ 카테고리 삭제: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::catalog::product::Product;
    use crate::repositories::catalog::{InMemoryCategoryRepository, InMemoryProductRepository};
    use rust_decimal_macros::dec;

    fn setup() -> (CategoryService, Arc<InMemoryProductRepository>) {
        let products = Arc::new(InMemoryProductRepository::new());
        let service = CategoryService::new(Arc::new(InMemoryCategoryRepository::new()), products.clone());
        (service, products)
    }

    fn create_request(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest { name: name.to_string(), description: None }
    }

    #[actix_web::test]
    async fn test_delete_referenced_category_is_conflict() {
        let (service, products) = setup();
        let category = service.create_category(create_request("Kitchen")).await.unwrap();
        let category_id = parse_object_id(&category.id, "category_id").unwrap();

        products
            .create(Product::new("Mug".to_string(), None, dec!(9.90), Some(category_id)))
            .await
            .unwrap();

        let result = service.delete_category(&category.id).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_delete_unreferenced_category() {
        let (service, _) = setup();
        let category = service.create_category(create_request("Garden")).await.unwrap();

        service.delete_category(&category.id).await.unwrap();
        assert!(matches!(service.get_category(&category.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete_category(&category.id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_partial_update_keeps_description() {
        let (service, _) = setup();
        let created = service
            .create_category(CreateCategoryRequest {
                name: "Books".to_string(),
                description: Some("Paper".to_string()),
            })
            .await
            .unwrap();

        let updated = service
            .update_category(&created.id, UpdateCategoryRequest { name: Some("Novels".to_string()), ..Default::default() })
            .await
            .unwrap();

        assert_eq!(updated.name, "Novels");
        assert_eq!(updated.description.as_deref(), Some("Paper"));
    }

    #[actix_web::test]
    async fn test_list_categories_is_paginated() {
        let (service, _) = setup();
        for name in ["A", "B", "C"] {
            service.create_category(create_request(name)).await.unwrap();
        }

        let page = service.list_categories(Pagination::new(Some(2), Some(2), 20, 100)).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
    }
}
