//! 미들웨어 모듈
//!
//! - [`AuthMiddleware`] - Bearer 액세스 토큰 검증과 역할 기반 접근 제어.
//!   성공하면 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를
//!   request extensions에 넣습니다. 토큰이 없거나 유효하지 않으면 401, 역할이 부족하면 403.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
