//! 카탈로그 엔티티 모듈
//!
//! 카테고리와 상품(옵션 포함)을 정의합니다. 상품 옵션은 별도 컬렉션 없이
//! 상품 문서에 내장됩니다.

pub mod category;
pub mod product;
