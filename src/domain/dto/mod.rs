//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문과 매핑되는 구조체들입니다. 엔티티를 그대로 노출하지 않고
//! 응답 DTO로 변환하여 ID는 16진수 문자열, 시간은 RFC 3339 문자열로 내보냅니다.

pub mod common;
pub mod users;
pub mod catalog;
pub mod orders;
pub mod payments;

pub use common::{ApiResponse, PaginatedResponse};
