//! 인증 모델
//!
//! 미들웨어가 요청 extensions에 넣는 [`AuthenticatedUser`]와
//! 스코프별 역할 요구사항 [`RequiredRole`]입니다.

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::AuthenticatedUser;
pub use authentication_request::RequiredRole;
