//! Order Entity
//!
//! 주문과 주문 항목, 그리고 주문 상태 머신을 정의합니다.
//!
//! ```text
//!             ┌──────────► completed
//!   pending ──┤
//!             └──────────► cancelled
//! ```
//!
//! `completed`와 `cancelled`는 종료 상태이며, 모든 전이는 `pending`에서만 가능합니다.
//! 결제 웹훅은 `apply_payment_result`로 검증 없이 `completed`로 전이시킵니다.

use std::fmt;

use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

/// 주문 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Completed => "completed",
        }
    }

    /// 요청 문자열에서 상태를 파싱합니다. 알 수 없는 값이면 `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "cancelled" => Some(OrderStatus::Cancelled),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// `self`에서 `next`로의 전이가 허용되는지 확인합니다.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 결제 상태
///
/// 결제 웹훅 처리기만 이 값을 변경합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    /// 웹훅이 보고할 수 있는 값은 정확히 `paid`, `failed` 두 가지뿐입니다.
    pub fn from_webhook_value(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 주문 상태 머신 에러
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    #[error("Invalid order status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

impl From<OrderError> for AppError {
    fn from(error: OrderError) -> Self {
        AppError::InvalidState(error.to_string())
    }
}

/// 주문 항목
///
/// 주문 시점의 상품명, SKU, 단가를 그대로 보관합니다. 이후 상품 가격이 바뀌어도
/// 주문 금액은 변하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<ObjectId>,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl OrderItem {
    pub fn new(
        product_id: ObjectId,
        variant_id: Option<ObjectId>,
        product_name: String,
        sku: Option<String>,
        quantity: i32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            product_id,
            variant_id,
            product_name,
            sku,
            quantity,
            unit_price,
            subtotal: unit_price * Decimal::from(quantity),
        }
    }
}

/// 주문 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub customer_id: i64,
    /// 주문을 만든 사용자 ID. 관리자가 아니면 자신의 주문만 볼 수 있습니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub items: Vec<OrderItem>,
    /// 항목 소계의 합
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Order {
    /// 새 주문 생성 (`pending`, `unpaid`)
    pub fn new(customer_id: i64, items: Vec<OrderItem>) -> Self {
        let now = DateTime::now();
        let total_price = items.iter().map(|item| item.subtotal).sum();

        Self {
            id: None,
            customer_id,
            owner_id: None,
            items,
            total_price,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 상태 머신 규칙에 따라 주문 상태를 변경합니다.
    ///
    /// 허용되지 않는 전이는 주문을 변경하지 않고 `InvalidTransition`을 반환합니다.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        self.updated_at = DateTime::now();
        Ok(())
    }

    /// 결제 결과를 반영합니다.
    ///
    /// 결제 대행사는 신뢰된 호출자이므로 `paid`는 상태 머신 검증 없이
    /// 주문을 `completed`로 만듭니다. `failed`는 주문 상태를 유지합니다.
    pub fn apply_payment_result(&mut self, payment_status: PaymentStatus) {
        self.payment_status = payment_status;
        if payment_status == PaymentStatus::Paid {
            self.status = OrderStatus::Completed;
        }
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_order() -> Order {
        let items = vec![
            OrderItem::new(ObjectId::new(), None, "Mug".to_string(), None, 2, dec!(12.50)),
            OrderItem::new(
                ObjectId::new(),
                Some(ObjectId::new()),
                "T-Shirt".to_string(),
                Some("TS-RED-M".to_string()),
                1,
                dec!(19.90),
            ),
        ];
        Order::new(42, items)
    }

    #[test]
    fn test_new_order_defaults_and_total() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert_eq!(order.items[0].subtotal, dec!(25.00));
        assert_eq!(order.total_price, dec!(44.90));
    }

    #[test]
    fn test_empty_order_total_is_zero() {
        let order = Order::new(1, Vec::new());
        assert_eq!(order.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_transitions_from_pending() {
        let mut order = sample_order();
        assert!(order.transition_to(OrderStatus::Completed).is_ok());
        assert_eq!(order.status, OrderStatus::Completed);

        let mut order = sample_order();
        assert!(order.transition_to(OrderStatus::Cancelled).is_ok());
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_pending_to_pending_is_rejected() {
        let mut order = sample_order();
        let before = order.updated_at;

        let result = order.transition_to(OrderStatus::Pending);

        assert_eq!(
            result,
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Pending,
            })
        );
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.updated_at, before);
    }

    #[test]
    fn test_terminal_states_cannot_exit() {
        for terminal in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for next in [OrderStatus::Pending, OrderStatus::Completed, OrderStatus::Cancelled] {
                let mut order = sample_order();
                order.status = terminal;

                assert!(order.transition_to(next).is_err());
                assert_eq!(order.status, terminal);
            }
        }
    }

    #[test]
    fn test_apply_payment_result() {
        let mut paid = sample_order();
        paid.apply_payment_result(PaymentStatus::Paid);
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.status, OrderStatus::Completed);

        let mut failed = sample_order();
        failed.apply_payment_result(PaymentStatus::Failed);
        assert_eq!(failed.payment_status, PaymentStatus::Failed);
        assert_eq!(failed.status, OrderStatus::Pending);
    }

    #[test]
    fn test_payment_status_from_webhook_value() {
        assert_eq!(PaymentStatus::from_webhook_value("paid"), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::from_webhook_value("failed"), Some(PaymentStatus::Failed));
        assert_eq!(PaymentStatus::from_webhook_value("unpaid"), None);
        assert_eq!(PaymentStatus::from_webhook_value("PAID"), None);
        assert_eq!(PaymentStatus::from_webhook_value(""), None);
    }

    #[test]
    fn test_invalid_transition_maps_to_invalid_state() {
        let error: AppError = OrderError::InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Cancelled,
        }
        .into();

        match error {
            AppError::InvalidState(msg) => assert!(msg.contains("completed -> cancelled")),
            other => panic!("Expected InvalidState, got {:?}", other),
        }
    }
}
