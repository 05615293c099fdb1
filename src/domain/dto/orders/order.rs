use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::orders::order::{Order, OrderItem};
use crate::utils::string_utils::format_datetime;

/// 주문 생성 요청
///
/// ```json
/// {
///   "customer_id": 42,
///   "items": [
///     { "product_id": "64b7f0c2a1b2c3d4e5f60718", "quantity": 2 },
///     { "product_id": "64b7f0c2a1b2c3d4e5f60719", "variant_id": "64b7f0c2a1b2c3d4e5f6071a", "quantity": 1 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "고객 ID는 1 이상이어야 합니다"))]
    pub customer_id: i64,

    #[validate(length(min = 1, message = "주문 항목이 최소 1개 필요합니다"))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

/// `length` 검증이 에러 파라미터로 값을 담기 때문에 `Serialize`가 필요합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    #[validate(length(min = 1, message = "상품 ID가 필요합니다"))]
    pub product_id: String,

    pub variant_id: Option<String>,

    #[validate(range(min = 1, message = "수량은 1 이상이어야 합니다"))]
    pub quantity: i32,
}

/// 관리자 주문 상태 변경 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "변경할 상태가 필요합니다"))]
    pub status: String,
}

/// `GET /api/v1/orders` 쿼리
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub customer_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub product_name: String,
    pub sku: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id.to_hex(),
            variant_id: item.variant_id.map(|id| id.to_hex()),
            product_name: item.product_name,
            sku: item.sku,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_id: i64,
    pub items: Vec<OrderItemResponse>,
    pub total_price: Decimal,
    pub status: String,
    pub payment_status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id_string().unwrap_or_default(),
            customer_id: order.customer_id,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            total_price: order.total_price,
            status: order.status.as_str().to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            created_at: format_datetime(&order.created_at),
            updated_at: format_datetime(&order.updated_at),
        }
    }
}
