//! 주문 요청/응답 DTO

pub mod order;

pub use order::{
    CreateOrderRequest, OrderItemRequest, OrderItemResponse, OrderListQuery, OrderResponse,
    UpdateOrderStatusRequest,
};
