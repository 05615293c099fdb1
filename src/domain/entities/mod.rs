//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 도메인 엔티티들을 정의합니다.
//!
//! ```text
//! entities/
//! ├── users/    ← 계정과 역할
//! ├── catalog/  ← 카테고리, 상품, 상품 옵션(variant)
//! └── orders/   ← 주문 상태 머신, 결제 웹훅 로그
//! ```

pub mod users;
pub mod catalog;
pub mod orders;
