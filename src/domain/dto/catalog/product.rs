use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::catalog::product::{Product, ProductVariant};
use crate::utils::string_utils::{deserialize_optional_string, format_datetime};

/// 상품 생성 요청
///
/// ```json
/// {
///   "name": "Organic Cotton T-Shirt",
///   "price": 19.90,
///   "category_id": "64b7f0c2a1b2c3d4e5f60718",
///   "variants": [{ "sku": "TS-RED-M", "name": "Red / M" }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품 이름은 1-200자 사이여야 합니다"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_non_negative_price"))]
    pub price: Decimal,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category_id: Option<String>,

    pub is_active: Option<bool>,

    #[serde(default)]
    #[validate(nested)]
    pub variants: Vec<CreateVariantRequest>,
}

/// 상품 부분 수정 요청
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품 이름은 1-200자 사이여야 합니다"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(custom(function = "validate_non_negative_price"))]
    pub price: Option<Decimal>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category_id: Option<String>,

    pub is_active: Option<bool>,
}

/// 상품 옵션 추가 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVariantRequest {
    #[validate(length(min = 1, max = 64, message = "SKU는 1-64자 사이여야 합니다"))]
    pub sku: String,

    #[validate(length(min = 1, max = 100, message = "옵션 이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(custom(function = "validate_non_negative_price"))]
    pub price_override: Option<Decimal>,
}

/// 상품 옵션 수정 요청
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVariantRequest {
    #[validate(length(min = 1, max = 64, message = "SKU는 1-64자 사이여야 합니다"))]
    pub sku: Option<String>,

    #[validate(length(min = 1, max = 100, message = "옵션 이름은 1-100자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_non_negative_price"))]
    pub price_override: Option<Decimal>,
}

/// `GET /api/v1/products` 쿼리
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub category_id: Option<String>,
}

fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("negative_price")
            .with_message("가격은 0 이상이어야 합니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResponse {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub price_override: Option<Decimal>,
    /// 옵션을 고려한 실제 단가
    pub effective_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Option<String>,
    pub is_active: bool,
    pub variants: Vec<VariantResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl VariantResponse {
    fn from_variant(product: &Product, variant: &ProductVariant) -> Self {
        Self {
            id: variant.id.to_hex(),
            sku: variant.sku.clone(),
            name: variant.name.clone(),
            price_override: variant.price_override,
            effective_price: product.effective_price(Some(variant)),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let variants = product
            .variants
            .iter()
            .map(|variant| VariantResponse::from_variant(&product, variant))
            .collect();

        Self {
            id: product.id_string().unwrap_or_default(),
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id.map(|id| id.to_hex()),
            is_active: product.is_active,
            variants,
            created_at: format_datetime(&product.created_at),
            updated_at: format_datetime(&product.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_price_rejected() {
        let req: CreateProductRequest =
            serde_json::from_str(r#"{"name": "Mug", "price": -1}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateProductRequest =
            serde_json::from_str(r#"{"name": "Mug", "price": 0}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.variants.is_empty());
    }

    #[test]
    fn test_nested_variant_validation() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name": "Mug", "price": "12.50", "variants": [{"sku": "", "name": "Blue"}]}"#,
        )
        .unwrap();
        assert_eq!(req.price, dec!(12.50));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_price_override_rejected() {
        let req = UpdateVariantRequest {
            price_override: Some(dec!(-0.01)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_product_response_effective_price() {
        let mut product = Product::new("T-Shirt".to_string(), None, dec!(19.90), None);
        product
            .variants
            .push(ProductVariant::new("TS-GOLD".to_string(), "Gold".to_string(), Some(dec!(29.90))));

        let response = ProductResponse::from(product);
        assert_eq!(response.variants[0].effective_price, dec!(29.90));
        assert_eq!(response.price, dec!(19.90));
    }
}
