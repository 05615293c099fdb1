//! # 리프레시 토큰 세션 저장소
//!
//! 사용자별로 현재 유효한 리프레시 토큰 하나를 기록합니다.
//! 토큰 원문 대신 `jti`의 SHA-256 해시만 저장하며, 갱신할 때마다 새 값으로 교체되어
//! 이전 리프레시 토큰은 재사용할 수 없게 됩니다.
//!
//! Redis 키: `refresh_token:{user_id}` (TTL = 리프레시 토큰 유효 기간)

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::errors::errors::{AppError, AppResult};

/// 최소 세션 TTL (초)
const MIN_SESSION_TTL_SECONDS: u64 = 60;

/// 저장되는 리프레시 세션 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenInfo {
    pub user_id: String,
    /// 리프레시 토큰 `jti`의 SHA-256 해시 (hex)
    pub token_hash: String,
    pub login_at: i64,
    pub expires_at: i64,
}

impl RefreshTokenInfo {
    fn new(user_id: &str, jti: &str, ttl_seconds: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id: user_id.to_string(),
            token_hash: hash_jti(jti),
            login_at: now,
            expires_at: now + ttl_seconds as i64,
        }
    }

    pub fn matches(&self, jti: &str) -> bool {
        self.token_hash == hash_jti(jti) && self.expires_at > Utc::now().timestamp()
    }
}

pub fn hash_jti(jti: &str) -> String {
    hex::encode(Sha256::digest(jti.as_bytes()))
}

fn session_key(user_id: &str) -> String {
    format!("refresh_token:{}", user_id)
}

fn safe_ttl(ttl_seconds: u64) -> u64 {
    if ttl_seconds < MIN_SESSION_TTL_SECONDS {
        log::warn!("TTL이 너무 작습니다 ({}초). 최소값 {}초로 설정합니다.", ttl_seconds, MIN_SESSION_TTL_SECONDS);
        MIN_SESSION_TTL_SECONDS
    } else {
        ttl_seconds
    }
}

/// 리프레시 세션 저장소
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// 사용자의 현재 리프레시 토큰을 기록합니다. 기존 세션은 교체됩니다.
    async fn store_refresh_token(&self, user_id: &str, jti: &str, ttl_seconds: u64) -> AppResult<()>;

    /// `jti`가 사용자의 현재 세션과 일치하고 만료되지 않았는지 확인합니다.
    async fn is_current_refresh_token(&self, user_id: &str, jti: &str) -> AppResult<bool>;

    async fn delete_refresh_token(&self, user_id: &str) -> AppResult<()>;
}

/// Redis 기반 세션 저장소
pub struct RedisTokenRepository {
    redis: Arc<RedisClient>,
}

impl RedisTokenRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl Repository for RedisTokenRepository {
    fn name(&self) -> &str {
        "token"
    }

    fn collection_name(&self) -> &str {
        "refresh_token:*"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn store_refresh_token(&self, user_id: &str, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        let ttl = safe_ttl(ttl_seconds);
        let info = RefreshTokenInfo::new(user_id, jti, ttl);

        self.redis
            .set_with_expiry(&session_key(user_id), &info, ttl)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::debug!("Refresh token 저장 완료 - user_id: {}, ttl: {}초", user_id, ttl);
        Ok(())
    }

    async fn is_current_refresh_token(&self, user_id: &str, jti: &str) -> AppResult<bool> {
        let info = self.redis
            .get::<RefreshTokenInfo>(&session_key(user_id))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(info.is_some_and(|info| info.matches(jti)))
    }

    async fn delete_refresh_token(&self, user_id: &str) -> AppResult<()> {
        self.redis
            .del(&session_key(user_id))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}

/// 프로세스 메모리 기반 세션 저장소
#[derive(Default)]
pub struct InMemoryTokenRepository {
    sessions: RwLock<HashMap<String, RefreshTokenInfo>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryTokenRepository {
    fn name(&self) -> &str {
        "token"
    }

    fn collection_name(&self) -> &str {
        "refresh_token:*"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn store_refresh_token(&self, user_id: &str, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        let info = RefreshTokenInfo::new(user_id, jti, safe_ttl(ttl_seconds));
        self.sessions.write().await.insert(user_id.to_string(), info);
        Ok(())
    }

    async fn is_current_refresh_token(&self, user_id: &str, jti: &str) -> AppResult<bool> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(user_id).is_some_and(|info| info.matches(jti)))
    }

    async fn delete_refresh_token(&self, user_id: &str) -> AppResult<()> {
        self.sessions.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_jti_is_stable_hex() {
        let hash = hash_jti("abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_jti("abc"));
        assert_ne!(hash, hash_jti("abd"));
    }

    #[actix_web::test]
    async fn test_in_memory_session_rotation() {
        let repo = InMemoryTokenRepository::new();

        repo.store_refresh_token("user-1", "jti-1", 3600).await.unwrap();
        assert!(repo.is_current_refresh_token("user-1", "jti-1").await.unwrap());

        repo.store_refresh_token("user-1", "jti-2", 3600).await.unwrap();
        assert!(!repo.is_current_refresh_token("user-1", "jti-1").await.unwrap());
        assert!(repo.is_current_refresh_token("user-1", "jti-2").await.unwrap());

        repo.delete_refresh_token("user-1").await.unwrap();
        assert!(!repo.is_current_refresh_token("user-1", "jti-2").await.unwrap());
    }

    #[test]
    fn test_safe_ttl_minimum() {
        assert_eq!(safe_ttl(0), MIN_SESSION_TTL_SECONDS);
        assert_eq!(safe_ttl(3600), 3600);
    }
}
