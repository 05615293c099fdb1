//! 주문 HTTP 핸들러
//!
//! 모든 경로는 인증이 필요하며, 임의 상태 변경은 관리자 전용입니다.
//! 일반 사용자는 자신이 만든 주문만 조회하고 취소할 수 있습니다. 다른 사용자의
//! 주문은 404로 응답합니다.
//!
//! ```text
//! POST  /api/v1/orders                         주문 생성 (201)
//! GET   /api/v1/orders?page&page_size&customer_id
//! GET   /api/v1/orders/{id}
//! POST  /api/v1/orders/{id}/cancel             pending → cancelled
//! GET   /api/v1/orders/{id}/payment-history    웹훅 로그 (최신순)
//! PATCH /api/v1/admin/orders/{id}/status       {"status": "..."}
//! ```

use actix_web::{get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::domain::dto::orders::{CreateOrderRequest, OrderListQuery, UpdateOrderStatusRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::pagination::{PageQuery, Pagination};
use crate::errors::errors::AppError;
use crate::services::orders::{OrderScope, OrderService};
use crate::services::payments::PaymentWebhookService;
use crate::utils::string_utils::parse_object_id;

/// 주문 생성
///
/// 각 항목의 상품은 존재하고 판매 중이어야 하며, 옵션은 해당 상품의 것이어야 합니다.
/// 상품명, SKU, 단가는 주문 시점 값으로 복사됩니다.
#[post("")]
pub async fn create_order(
    user: AuthenticatedUser,
    payload: web::Json<CreateOrderRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let order = order_service
        .create_order(payload.into_inner(), Some(&user.user_id))
        .await?;
    Ok(HttpResponse::Created().json(order))
}

#[get("")]
pub async fn list_orders(
    user: AuthenticatedUser,
    query: web::Query<OrderListQuery>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let pagination = Pagination::from_query(&PageQuery {
        page: query.page,
        page_size: query.page_size,
    });

    let page = order_service
        .list_orders(pagination, query.customer_id, &OrderScope::for_user(&user))
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{order_id}")]
pub async fn get_order(
    user: AuthenticatedUser,
    order_id: web::Path<String>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let order = order_service.get_order(&order_id, &OrderScope::for_user(&user)).await?;
    Ok(HttpResponse::Ok().json(order))
}

#[post("/{order_id}/cancel")]
pub async fn cancel_order(
    user: AuthenticatedUser,
    order_id: web::Path<String>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let order = order_service.cancel_order(&order_id, &OrderScope::for_user(&user)).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// 주문의 결제 웹훅 처리 이력
///
/// 형식이 잘못된 주문 ID는 400, 이력이 없으면 빈 배열입니다.
/// 일반 사용자는 자신의 주문 이력만 볼 수 있습니다.
#[get("/{order_id}/payment-history")]
pub async fn get_payment_history(
    user: AuthenticatedUser,
    order_id: web::Path<String>,
    order_service: web::Data<OrderService>,
    webhook_service: web::Data<PaymentWebhookService>,
) -> Result<HttpResponse, AppError> {
    parse_object_id(&order_id, "order_id")?;
    order_service
        .ensure_visible(&order_id, &OrderScope::for_user(&user))
        .await?;

    let history = webhook_service.get_webhook_history(&order_id).await?;
    Ok(HttpResponse::Ok().json(history))
}

/// 관리자 상태 변경. 허용되지 않는 전이는 409입니다.
#[patch("/{order_id}/status")]
pub async fn update_order_status(
    order_id: web::Path<String>,
    payload: web::Json<UpdateOrderStatusRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let order = order_service.update_status(&order_id, &payload.status).await?;
    log::info!("📦 주문 상태 변경 - order_id: {}, status: {}", order.id, order.status);
    Ok(HttpResponse::Ok().json(order))
}
