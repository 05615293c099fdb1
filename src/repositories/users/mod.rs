//! 사용자 데이터 액세스 계층
//!
//! MongoDB 기반 사용자 저장과 Redis 조회 캐싱을 제공합니다.

pub mod user_repo;

pub use user_repo::{InMemoryUserRepository, MongoUserRepository, UserRepository};
