//! 카탈로그 서비스 모듈
//!
//! 카테고리와 상품(내장 옵션 포함)의 관리 규칙을 담당합니다.

pub mod category_service;
pub mod product_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
