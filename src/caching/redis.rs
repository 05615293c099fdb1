//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 캐시 클라이언트를 제공합니다.
//! 사용자 조회 캐시와 리프레시 토큰 세션 저장에 사용됩니다.
//!
//! ## 연결 관리
//!
//! 시작할 때 만든 `ConnectionManager` 하나를 복제해서 씁니다. 멀티플렉싱된
//! 단일 연결을 공유하며, 연결이 끊기면 매니저가 다시 연결합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// Redis 캐시 클라이언트 래퍼
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::redis::RedisClient;
///
/// let redis = RedisClient::new().await?;
///
/// // 사용자 정보 캐싱 (10분 TTL)
/// redis.set_with_expiry("user:email:alice@example.com", &user, 600).await?;
///
/// // 캐시된 데이터 조회
/// let cached: Option<User> = redis.get("user:email:alice@example.com").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    /// 복제 비용이 낮은 공유 연결
    manager: ConnectionManager,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 Redis 서버 주소를 읽어오며,
    /// 설정되지 않은 경우 기본값 `redis://localhost:6379`를 사용합니다.
    /// 생성 시 PING으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        Ok(Self::connect(&redis_url).await?)
    }

    async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        let mut manager = ConnectionManager::new(client).await?;
        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    /// JSON으로 저장된 값을 조회하여 역직렬화합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        match self.get_string(key).await? {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 문자열 값을 그대로 조회합니다.
    pub async fn get_string(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.get(key).await
    }

    /// 값을 JSON으로 직렬화하여 TTL과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        self.set_string_with_expiry(key, &json, seconds).await
    }

    /// 문자열 값을 TTL과 함께 저장합니다.
    pub async fn set_string_with_expiry(&self, key: &str, value: &str, seconds: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.set_ex(key, value, seconds).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }

    /// 여러 키를 한 번에 삭제합니다. 빈 목록은 무시합니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.manager.clone();
        conn.del(keys).await
    }
}
