//! 주문 엔티티 모듈
//!
//! - [`order`]: 주문, 주문 항목, 주문/결제 상태와 상태 전이 규칙
//! - [`webhook_log`]: 결제 이벤트 처리 기록과 재시도 정보

pub mod order;
pub mod webhook_log;
