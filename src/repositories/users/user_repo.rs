//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다.
//! MongoDB를 주 저장소로 사용하고, Redis로 조회 결과를 캐싱합니다.
//!
//! ## 캐싱 전략
//!
//! - **TTL**: 10분 (600초)
//! - **키 패턴**: `user:{user_id}`, `user:email:{email}`
//! - 수정 시 두 키를 모두 무효화합니다.
//!
//! ## 인덱스
//!
//! `users` 컬렉션: email(unique), username(unique), created_at(desc)

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use log::warn;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use tokio::sync::RwLock;
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::{is_duplicate_key_error, Database},
    domain::entities::users::user::User,
};
use crate::errors::errors::{AppError, AppResult};

const USER_CACHE_TTL_SECONDS: u64 = 600;

/// 사용자 저장소
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    /// 이메일/사용자명이 중복되면 `ConflictError`
    async fn create(&self, user: User) -> AppResult<User>;

    /// 존재하지 않는 사용자면 `NotFound`
    async fn update(&self, user: &User) -> AppResult<()>;
}

/// MongoDB + Redis 기반 사용자 리포지토리
pub struct MongoUserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    fn collection(&self) -> mongodb::Collection<User> {
        self.db.get_database().collection::<User>("users")
    }

    fn id_cache_key(id: &ObjectId) -> String {
        format!("user:{}", id.to_hex())
    }

    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    async fn cache_user(&self, key: &str, user: &User) {
        if let Err(e) = self.redis.set_with_expiry(key, user, USER_CACHE_TTL_SECONDS).await {
            warn!("사용자 캐시 저장 실패 ({}): {}", key, e);
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, username_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Repository for MongoUserRepository {
    fn name(&self) -> &str {
        "user"
    }

    fn collection_name(&self) -> &str {
        "users"
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let cache_key = Self::email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let cache_key = Self::id_cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let result = self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 사용 중인 이메일 또는 사용자명입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("생성된 사용자 ID를 확인할 수 없습니다".to_string())
        })?);

        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let id = user.id.ok_or_else(|| AppError::ValidationError("사용자 ID가 없습니다".to_string()))?;

        let result = self.collection()
            .replace_one(doc! { "_id": id }, user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        let keys = vec![Self::id_cache_key(&id), Self::email_cache_key(&user.email)];
        if let Err(e) = self.redis.del_multiple(&keys).await {
            warn!("사용자 캐시 무효화 실패 ({}): {}", id, e);
        }

        Ok(())
    }
}

/// 프로세스 메모리 기반 사용자 리포지토리
///
/// MongoDB 인덱스와 같은 유일성 규칙(email, username)을 지킵니다.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryUserRepository {
    fn name(&self) -> &str {
        "user"
    }

    fn collection_name(&self) -> &str {
        "users"
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let id = user.id.ok_or_else(|| AppError::ValidationError("사용자 ID가 없습니다".to_string()))?;
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, username: &str) -> User {
        User::new_local(
            email.to_string(),
            username.to_string(),
            username.to_string(),
            "hash".to_string(),
            false,
        )
    }

    #[actix_web::test]
    async fn test_in_memory_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("alice@example.com", "alice")).await.unwrap();
        let id = created.id.unwrap();

        assert!(repo.find_by_id(&id).await.unwrap().is_some());
        assert!(repo.find_by_email("alice@example.com").await.unwrap().is_some());
        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_in_memory_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("alice@example.com", "alice")).await.unwrap();

        let dup_email = repo.create(user("alice@example.com", "alice2")).await;
        assert!(matches!(dup_email, Err(AppError::ConflictError(_))));

        let dup_username = repo.create(user("alice2@example.com", "alice")).await;
        assert!(matches!(dup_username, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_in_memory_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let mut ghost = user("ghost@example.com", "ghost");
        ghost.id = Some(ObjectId::new());

        assert!(matches!(repo.update(&ghost).await, Err(AppError::NotFound(_))));
    }
}
