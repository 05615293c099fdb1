//! 리프레시 토큰 세션 리포지토리 모듈
//!
//! 사용자별 현재 리프레시 토큰(jti 해시)을 Redis TTL과 함께 보관합니다.

pub mod token_repository;

pub use token_repository::{InMemoryTokenRepository, RedisTokenRepository, TokenRepository};
