//! 주문 서비스 모듈

pub mod order_service;

pub use order_service::{OrderScope, OrderService};
