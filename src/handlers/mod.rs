//! # HTTP Request Handlers Module
//!
//! 요청을 DTO로 받아 검증(`payload.validate()?`)한 뒤 서비스에 위임하고,
//! 결과를 JSON 응답으로 바꿉니다. 서비스는 `web::Data<…Service>`로 주입됩니다.
//! 에러는 [`AppError`](crate::errors::errors::AppError)의 `ResponseError` 구현이 상태 코드로 변환합니다.
//!
//! ```text
//! handlers/
//! ├── users.rs        회원가입, 현재 사용자
//! ├── auth.rs         로그인, 토큰 갱신, 로그아웃
//! ├── categories.rs   카테고리 조회/관리
//! ├── products.rs     상품과 옵션 조회/관리
//! ├── orders.rs       주문 생성, 취소, 상태 변경, 결제 이력
//! ├── payments.rs     결제 웹훅 수신 (서명 검증)
//! └── health.rs       헬스체크
//! ```

#[cfg(test)]
#[macro_use]
mod test_support;

pub mod users;
pub mod auth;
pub mod categories;
pub mod products;
pub mod orders;
pub mod payments;
pub mod health;
