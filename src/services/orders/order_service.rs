//! 주문 서비스
//!
//! 주문 생성 시 상품 정보를 조회해 항목별 스냅샷(상품명, SKU, 단가, 소계)을 만들고,
//! 상태 변경은 [`Order::transition_to`] 상태 머신을 거칩니다.
//! 결제 상태는 이 서비스에서 바꾸지 않습니다.
//!
//! 조회와 취소는 [`OrderScope`] 안에서만 동작합니다. 범위 밖의 주문은
//! 존재하지 않는 주문과 똑같이 `NotFound`입니다.

use std::sync::Arc;
use crate::{
    domain::{
        dto::{
            orders::{CreateOrderRequest, OrderItemRequest, OrderResponse},
            PaginatedResponse,
        },
        entities::{
            orders::order::{Order, OrderItem, OrderStatus},
            users::user::ROLE_ADMIN,
        },
        models::{auth::AuthenticatedUser, pagination::Pagination},
    },
    repositories::{
        catalog::ProductRepository,
        orders::{OrderFilter, OrderRepository},
    },
    utils::string_utils::parse_object_id,
};
use crate::errors::errors::{AppError, AppResult};

/// 주문 접근 범위
#[derive(Debug, Clone, PartialEq)]
pub enum OrderScope {
    /// 관리자: 모든 주문
    All,
    /// 일반 사용자: 자신이 만든 주문만
    Owner(String),
}

impl OrderScope {
    pub fn for_user(user: &AuthenticatedUser) -> Self {
        if user.has_role(ROLE_ADMIN) {
            OrderScope::All
        } else {
            OrderScope::Owner(user.user_id.clone())
        }
    }

    fn permits(&self, order: &Order) -> bool {
        match self {
            OrderScope::All => true,
            OrderScope::Owner(user_id) => order.owner_id.as_deref() == Some(user_id.as_str()),
        }
    }

    fn owner_id(&self) -> Option<String> {
        match self {
            OrderScope::All => None,
            OrderScope::Owner(user_id) => Some(user_id.clone()),
        }
    }
}

pub struct OrderService {
    order_repo: Arc<dyn OrderRepository>,
    product_repo: Arc<dyn ProductRepository>,
}

impl OrderService {
    pub fn new(order_repo: Arc<dyn OrderRepository>, product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { order_repo, product_repo }
    }

    async fn load(&self, id: &str, scope: &OrderScope) -> AppResult<Order> {
        let object_id = parse_object_id(id, "order_id")?;

        self.order_repo
            .find_by_id(&object_id)
            .await?
            .filter(|order| scope.permits(order))
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))
    }

    /// 요청 항목 하나를 가격이 확정된 주문 항목으로 만듭니다.
    async fn price_item(&self, request: &OrderItemRequest) -> AppResult<OrderItem> {
        let product_id = parse_object_id(&request.product_id, "product_id")?;

        let product = self
            .product_repo
            .find_by_id(&product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| {
                AppError::ValidationError(format!("주문할 수 없는 상품입니다: {}", request.product_id))
            })?;

        let variant = match request.variant_id.as_deref() {
            Some(variant_id) => {
                let variant_oid = parse_object_id(variant_id, "variant_id")?;
                let variant = product.find_variant(&variant_oid).ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "상품 {}에 속하지 않는 옵션입니다: {}",
                        request.product_id, variant_id
                    ))
                })?;
                Some(variant)
            }
            None => None,
        };

        Ok(OrderItem::new(
            product_id,
            variant.map(|v| v.id),
            product.name.clone(),
            variant.map(|v| v.sku.clone()),
            request.quantity,
            product.effective_price(variant),
        ))
    }

    /// `owner_id`는 주문을 만든 사용자입니다. 이후 조회 범위를 정합니다.
    pub async fn create_order(&self, request: CreateOrderRequest, owner_id: Option<&str>) -> AppResult<OrderResponse> {
        let mut items = Vec::with_capacity(request.items.len());
        for item in &request.items {
            items.push(self.price_item(item).await?);
        }

        let mut order = Order::new(request.customer_id, items);
        order.owner_id = owner_id.map(str::to_string);

        let order = self.order_repo.create(order).await?;
        log::info!(
            "🛒 주문 생성 - id: {}, 고객: {}, 합계: {}",
            order.id_string().unwrap_or_default(),
            order.customer_id,
            order.total_price
        );

        Ok(OrderResponse::from(order))
    }

    pub async fn get_order(&self, id: &str, scope: &OrderScope) -> AppResult<OrderResponse> {
        Ok(OrderResponse::from(self.load(id, scope).await?))
    }

    /// 범위 안의 주문인지 확인합니다. 관리자는 조회 없이 통과합니다.
    pub async fn ensure_visible(&self, id: &str, scope: &OrderScope) -> AppResult<()> {
        match scope {
            OrderScope::All => Ok(()),
            OrderScope::Owner(_) => self.load(id, scope).await.map(|_| ()),
        }
    }

    pub async fn list_orders(
        &self,
        pagination: Pagination,
        customer_id: Option<i64>,
        scope: &OrderScope,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let filter = OrderFilter { customer_id, owner_id: scope.owner_id() };
        let (items, total) = self
            .order_repo
            .find_page(&filter, pagination.skip(), pagination.limit())
            .await?;

        Ok(PaginatedResponse::new(items, pagination, total).map(OrderResponse::from))
    }

    /// 상태 머신 규칙에 따라 주문 상태를 바꿉니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 알 수 없는 상태 값
    /// * `AppError::InvalidState` - 허용되지 않는 전이 (주문은 그대로)
    pub async fn update_status(&self, id: &str, status: &str) -> AppResult<OrderResponse> {
        let next = OrderStatus::parse(status)
            .ok_or_else(|| AppError::ValidationError(format!("알 수 없는 주문 상태입니다: {}", status)))?;

        self.transition(id, next, &OrderScope::All).await
    }

    pub async fn cancel_order(&self, id: &str, scope: &OrderScope) -> AppResult<OrderResponse> {
        self.transition(id, OrderStatus::Cancelled, scope).await
    }

    async fn transition(&self, id: &str, next: OrderStatus, scope: &OrderScope) -> AppResult<OrderResponse> {
        let mut order = self.load(id, scope).await?;
        let previous = order.status;

        order.transition_to(next)?;
        self.order_repo.update(&order).await?;

        log::info!("📋 주문 상태 변경 - id: {}, {} -> {}", id, previous, next);
        Ok(OrderResponse::from(order))
    }
}
