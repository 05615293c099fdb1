//! 인증 서비스 모듈
//!
//! JWT 액세스/리프레시 토큰 발급과 검증, 로그인/갱신/로그아웃 흐름을 제공합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - 리프레시 토큰 회전 (사용자별 현재 `jti` 하나만 유효)
//! - 토큰 용도(access/refresh) 구분
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthService;
//!
//! let login = auth_service.login("user@example.com", "Password123").await?;
//! let refreshed = auth_service.refresh(&login.refresh_token).await?;
//! ```

pub mod token_service;
pub mod auth_service;

pub use token_service::TokenService;
pub use auth_service::AuthService;
