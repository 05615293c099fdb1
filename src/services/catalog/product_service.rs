//! 상품 및 상품 옵션 관리 서비스
//!
//! ## 규칙
//!
//! - 가격과 옵션 가격은 0 이상 (DTO 검증)
//! - 카테고리를 지정하면 존재하는 카테고리여야 함
//! - SKU는 같은 상품 안에서 유일
//! - 공개 조회는 판매 중(`is_active`)인 상품만 노출

use std::collections::HashSet;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::{
    domain::{
        dto::{
            catalog::{
                CreateProductRequest, CreateVariantRequest, ProductResponse, UpdateProductRequest,
                UpdateVariantRequest,
            },
            PaginatedResponse,
        },
        entities::catalog::product::{Product, ProductVariant},
        models::pagination::Pagination,
    },
    repositories::catalog::{CategoryRepository, ProductFilter, ProductRepository},
    utils::string_utils::{parse_object_id, validate_required_string},
};
use crate::errors::errors::{AppError, AppResult};

fn duplicate_sku_error(sku: &str) -> AppError {
    AppError::ConflictError(format!("이미 사용 중인 SKU입니다: {}", sku))
}

pub struct ProductService {
    product_repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(product_repo: Arc<dyn ProductRepository>, category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { product_repo, category_repo }
    }

    async fn load(&self, id: &str) -> AppResult<Product> {
        let object_id = parse_object_id(id, "product_id")?;

        self.product_repo
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }

    /// 카테고리 id 문자열을 검증하고 존재 여부를 확인합니다.
    async fn resolve_category(&self, category_id: &str) -> AppResult<ObjectId> {
        let object_id = parse_object_id(category_id, "category_id")?;

        if self.category_repo.find_by_id(&object_id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "존재하지 않는 카테고리입니다: {}",
                category_id
            )));
        }
        Ok(object_id)
    }

    pub async fn create_product(&self, request: CreateProductRequest) -> AppResult<ProductResponse> {
        let name = validate_required_string(&request.name, "name")?;
        let category_id = match request.category_id.as_deref() {
            Some(id) => Some(self.resolve_category(id).await?),
            None => None,
        };

        let mut seen = HashSet::new();
        for variant in &request.variants {
            if !seen.insert(variant.sku.as_str()) {
                return Err(duplicate_sku_error(&variant.sku));
            }
        }

        let mut product = Product::new(name, request.description, request.price, category_id);
        product.is_active = request.is_active.unwrap_or(true);
        product.variants = request
            .variants
            .into_iter()
            .map(|v| ProductVariant::new(v.sku, v.name, v.price_override))
            .collect();

        let created = self.product_repo.create(product).await?;
        log::info!("📦 상품 생성: {} (옵션 {}개)", created.name, created.variants.len());

        Ok(ProductResponse::from(created))
    }

    /// 판매 중인 상품만 조회됩니다.
    pub async fn get_product(&self, id: &str) -> AppResult<ProductResponse> {
        let product = self.load(id).await?;
        if !product.is_active {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }
        Ok(ProductResponse::from(product))
    }

    /// 판매 중인 상품을 최신순으로 조회합니다.
    pub async fn list_products(
        &self,
        pagination: Pagination,
        category_id: Option<&str>,
    ) -> AppResult<PaginatedResponse<ProductResponse>> {
        let category_id = category_id
            .map(|id| parse_object_id(id, "category_id"))
            .transpose()?;
        let filter = ProductFilter { category_id, active_only: true };

        let (items, total) = self
            .product_repo
            .find_page(filter, pagination.skip(), pagination.limit())
            .await?;

        Ok(PaginatedResponse::new(items, pagination, total).map(ProductResponse::from))
    }

    pub async fn update_product(&self, id: &str, request: UpdateProductRequest) -> AppResult<ProductResponse> {
        let mut product = self.load(id).await?;

        if let Some(name) = request.name {
            product.name = validate_required_string(&name, "name")?;
        }
        if let Some(description) = request.description {
            product.description = Some(description);
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(category_id) = request.category_id.as_deref() {
            product.category_id = Some(self.resolve_category(category_id).await?);
        }
        if let Some(is_active) = request.is_active {
            product.is_active = is_active;
        }
        product.touch();

        self.product_repo.update(&product).await?;
        Ok(ProductResponse::from(product))
    }

    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id, "product_id")?;

        if !self.product_repo.delete(&object_id).await? {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }

        log::info!("🗑️ 상품 삭제: {}", id);
        Ok(())
    }

    pub async fn add_variant(&self, product_id: &str, request: CreateVariantRequest) -> AppResult<ProductResponse> {
        let mut product = self.load(product_id).await?;

        if product.has_sku(&request.sku, None) {
            return Err(duplicate_sku_error(&request.sku));
        }

        product
            .variants
            .push(ProductVariant::new(request.sku, request.name, request.price_override));
        product.touch();

        self.product_repo.update(&product).await?;
        Ok(ProductResponse::from(product))
    }

    pub async fn update_variant(
        &self,
        product_id: &str,
        variant_id: &str,
        request: UpdateVariantRequest,
    ) -> AppResult<ProductResponse> {
        let variant_oid = parse_object_id(variant_id, "variant_id")?;
        let mut product = self.load(product_id).await?;

        if let Some(sku) = request.sku.as_deref() {
            if product.has_sku(sku, Some(&variant_oid)) {
                return Err(duplicate_sku_error(sku));
            }
        }

        let variant = product
            .find_variant_mut(&variant_oid)
            .ok_or_else(|| AppError::NotFound("상품 옵션을 찾을 수 없습니다".to_string()))?;

        if let Some(sku) = request.sku {
            variant.sku = sku;
        }
        if let Some(name) = request.name {
            variant.name = name;
        }
        if let Some(price_override) = request.price_override {
            variant.price_override = Some(price_override);
        }
        product.touch();

        self.product_repo.update(&product).await?;
        Ok(ProductResponse::from(product))
    }

    pub async fn remove_variant(&self, product_id: &str, variant_id: &str) -> AppResult<ProductResponse> {
        let variant_oid = parse_object_id(variant_id, "variant_id")?;
        let mut product = self.load(product_id).await?;

        let before = product.variants.len();
        product.variants.retain(|v| v.id != variant_oid);
        if product.variants.len() == before {
            return Err(AppError::NotFound("상품 옵션을 찾을 수 없습니다".to_string()));
        }
        product.touch();

        self.product_repo.update(&product).await?;
        Ok(ProductResponse::from(product))
    }
}
