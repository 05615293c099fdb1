//! Product Entity
//!
//! 상품과 상품에 내장된 옵션(variant)을 정의합니다.
//! 주문 시 단가는 옵션의 `price_override`가 있으면 그 값을, 없으면 상품 가격을 사용합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 상품 옵션 (색상, 사이즈 등)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: ObjectId,
    /// 상품 내에서 유일한 SKU
    pub sku: String,
    pub name: String,
    /// 옵션별 가격 (None이면 상품 가격 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_override: Option<Decimal>,
}

impl ProductVariant {
    pub fn new(sku: String, name: String, price_override: Option<Decimal>) -> Self {
        Self {
            id: ObjectId::new(),
            sku,
            name,
            price_override,
        }
    }
}

/// 상품 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 기본 판매가
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ObjectId>,
    /// 판매 중 여부 (비활성 상품은 공개 목록과 주문에서 제외)
    pub is_active: bool,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    pub fn new(
        name: String,
        description: Option<String>,
        price: Decimal,
        category_id: Option<ObjectId>,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            name,
            description,
            price,
            category_id,
            is_active: true,
            variants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn find_variant(&self, variant_id: &ObjectId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.id == variant_id)
    }

    pub fn find_variant_mut(&mut self, variant_id: &ObjectId) -> Option<&mut ProductVariant> {
        self.variants.iter_mut().find(|v| &v.id == variant_id)
    }

    /// 같은 SKU를 가진 다른 옵션이 있는지 확인합니다.
    ///
    /// `except`로 지정한 옵션은 비교에서 제외합니다. (옵션 수정 시 자기 자신)
    pub fn has_sku(&self, sku: &str, except: Option<&ObjectId>) -> bool {
        self.variants
            .iter()
            .any(|v| v.sku == sku && Some(&v.id) != except)
    }

    /// 옵션을 고려한 실제 단가
    pub fn effective_price(&self, variant: Option<&ProductVariant>) -> Decimal {
        variant
            .and_then(|v| v.price_override)
            .unwrap_or(self.price)
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}
