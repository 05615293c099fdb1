//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 상태를 갖지 않으며, 필요한 저장소를 `Arc<dyn …Repository>`로 생성자에서 주입받습니다.
//! 조립은 [`crate::core::registry::ServiceRegistry`]가 담당합니다.
//!
//! ```text
//! services/
//! ├── users/      회원가입, 비밀번호 인증
//! ├── auth/       JWT 발급/검증, 로그인/갱신/로그아웃
//! ├── catalog/    카테고리, 상품, 상품 옵션
//! ├── orders/     주문 생성과 상태 전이
//! └── payments/   결제 웹훅 서명 검증과 처리
//! ```

pub mod users;
pub mod auth;
pub mod catalog;
pub mod orders;
pub mod payments;
