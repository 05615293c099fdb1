//! # Service Registry - 생성자 주입 기반 조립
//!
//! 모든 리포지토리와 서비스를 한 곳에서 만들어 연결합니다.
//! 전역 상태 없이 각 서비스가 필요한 저장소를 `Arc<dyn …Repository>`로 받습니다.
//!
//! ```text
//! ServiceRegistry::mongo(db, redis)      ServiceRegistry::in_memory()
//!            │                                      │
//!            └──────────────┬───────────────────────┘
//!                           ▼
//!                 Stores (trait object 묶음)
//!                           │
//!     ┌──────────┬──────────┼───────────┬──────────────┐
//!     ▼          ▼          ▼           ▼              ▼
//! UserService TokenService Catalog  OrderService  PaymentWebhookService
//!                           │
//!                           ▼
//!          initialize_all()  → Repository::init (인덱스 생성)
//!          configure_app_data → web::Data 등록
//! ```
//!
//! ## 생명주기 훅
//!
//! 저장소 구현체는 [`Repository`] trait으로 이름, 컬렉션, 초기화 작업을 노출합니다.
//! MongoDB 구현은 `init`에서 인덱스를 만들고, 메모리 구현은 아무 것도 하지 않습니다.

use std::sync::Arc;
use actix_web::web;
use async_trait::async_trait;
use crate::{
    caching::redis::RedisClient,
    config::{AdminConfig, JwtConfig, PasswordConfig, StorageBackend},
    db::Database,
    repositories::{
        catalog::{
            CategoryRepository, InMemoryCategoryRepository, InMemoryProductRepository,
            MongoCategoryRepository, MongoProductRepository, ProductRepository,
        },
        orders::{
            InMemoryOrderRepository, InMemoryWebhookLogRepository, MongoOrderRepository,
            MongoWebhookLogRepository, OrderRepository, WebhookLogRepository,
        },
        tokens::{InMemoryTokenRepository, RedisTokenRepository, TokenRepository},
        users::{InMemoryUserRepository, MongoUserRepository, UserRepository},
    },
    services::{
        auth::{AuthService, TokenService},
        catalog::{CategoryService, ProductService},
        orders::OrderService,
        payments::{PaymentWebhookService, WebhookSignatureVerifier},
        users::UserService,
    },
    utils::display_terminal::{print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task},
};
use crate::errors::errors::AppResult;

/// 데이터 액세스 리포지토리의 공통 생명주기
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리 이름 (로그/요약 출력용)
    fn name(&self) -> &str;

    /// 연결된 컬렉션 또는 키 패턴
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 시작 시 한 번 수행하는 작업
    async fn init(&self) -> AppResult<()>;
}

/// 서비스 조립에 필요한 설정 값
#[derive(Clone)]
pub struct ServiceSettings {
    pub admin_emails: Vec<String>,
    pub bcrypt_cost: u32,
    pub jwt_secret: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
    pub webhook_verifier: WebhookSignatureVerifier,
}

impl ServiceSettings {
    pub fn from_env() -> Self {
        Self {
            admin_emails: AdminConfig::emails(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            jwt_secret: JwtConfig::secret(),
            access_ttl_seconds: JwtConfig::expiration_hours() * 3600,
            refresh_ttl_seconds: JwtConfig::refresh_expiration_days() * 86400,
            webhook_verifier: WebhookSignatureVerifier::from_config(),
        }
    }
}

/// 저장소 trait object 묶음
struct Stores {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
    webhook_logs: Arc<dyn WebhookLogRepository>,
    lifecycle: Vec<Arc<dyn Repository>>,
}

impl Stores {
    fn mongo(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        let users = Arc::new(MongoUserRepository::new(db.clone(), redis.clone()));
        let tokens = Arc::new(RedisTokenRepository::new(redis));
        let categories = Arc::new(MongoCategoryRepository::new(db.clone()));
        let products = Arc::new(MongoProductRepository::new(db.clone()));
        let orders = Arc::new(MongoOrderRepository::new(db.clone()));
        let webhook_logs = Arc::new(MongoWebhookLogRepository::new(db));

        Self {
            lifecycle: vec![
                users.clone() as Arc<dyn Repository>,
                tokens.clone() as Arc<dyn Repository>,
                categories.clone() as Arc<dyn Repository>,
                products.clone() as Arc<dyn Repository>,
                orders.clone() as Arc<dyn Repository>,
                webhook_logs.clone() as Arc<dyn Repository>,
            ],
            users,
            tokens,
            categories,
            products,
            orders,
            webhook_logs,
        }
    }

    fn in_memory() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());
        let webhook_logs = Arc::new(InMemoryWebhookLogRepository::new());

        Self {
            lifecycle: vec![
                users.clone() as Arc<dyn Repository>,
                tokens.clone() as Arc<dyn Repository>,
                categories.clone() as Arc<dyn Repository>,
                products.clone() as Arc<dyn Repository>,
                orders.clone() as Arc<dyn Repository>,
                webhook_logs.clone() as Arc<dyn Repository>,
            ],
            users,
            tokens,
            categories,
            products,
            orders,
            webhook_logs,
        }
    }
}

/// 애플리케이션 서비스 컨테이너
pub struct ServiceRegistry {
    backend: StorageBackend,
    repositories: Vec<Arc<dyn Repository>>,
    pub user_service: Arc<UserService>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub category_service: Arc<CategoryService>,
    pub product_service: Arc<ProductService>,
    pub order_service: Arc<OrderService>,
    pub payment_webhook_service: Arc<PaymentWebhookService>,
    pub webhook_verifier: Arc<WebhookSignatureVerifier>,
}

impl ServiceRegistry {
    /// MongoDB + Redis 기반 조립
    pub fn mongo(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self::assemble(StorageBackend::MongoDb, Stores::mongo(db, redis), ServiceSettings::from_env())
    }

    /// 프로세스 메모리 기반 조립
    pub fn in_memory() -> Self {
        Self::in_memory_with_settings(ServiceSettings::from_env())
    }

    pub fn in_memory_with_settings(settings: ServiceSettings) -> Self {
        Self::assemble(StorageBackend::Memory, Stores::in_memory(), settings)
    }

    fn assemble(backend: StorageBackend, stores: Stores, settings: ServiceSettings) -> Self {
        let user_service = Arc::new(UserService::new(
            stores.users.clone(),
            settings.admin_emails,
            settings.bcrypt_cost,
        ));
        let token_service = Arc::new(TokenService::new(
            stores.tokens.clone(),
            settings.jwt_secret,
            settings.access_ttl_seconds,
            settings.refresh_ttl_seconds,
        ));
        let auth_service = Arc::new(AuthService::new(user_service.clone(), token_service.clone()));
        let category_service = Arc::new(CategoryService::new(stores.categories.clone(), stores.products.clone()));
        let product_service = Arc::new(ProductService::new(stores.products.clone(), stores.categories.clone()));
        let order_service = Arc::new(OrderService::new(stores.orders.clone(), stores.products.clone()));
        let payment_webhook_service = Arc::new(PaymentWebhookService::new(
            stores.orders.clone(),
            stores.webhook_logs.clone(),
        ));

        Self {
            backend,
            repositories: stores.lifecycle,
            user_service,
            token_service,
            auth_service,
            category_service,
            product_service,
            order_service,
            payment_webhook_service,
            webhook_verifier: Arc::new(settings.webhook_verifier),
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    fn service_names() -> [&'static str; 7] {
        ["user", "token", "auth", "category", "product", "order", "payment_webhook"]
    }

    /// 모든 리포지토리의 초기화 훅을 실행하고 요약을 출력합니다.
    pub async fn initialize_all(&self) -> AppResult<()> {
        print_boxed_title(&format!("🔧 SERVICE REGISTRY ({})", self.backend.as_str()));

        print_step_start(1, "Initializing repositories");
        for repository in &self.repositories {
            repository.init().await?;
            print_sub_task(repository.name(), &format!("OK ({})", repository.collection_name()));
        }
        print_step_complete(1, "Repositories initialized", self.repositories.len());

        print_step_start(2, "Wiring services");
        let services = Self::service_names();
        for name in services {
            print_sub_task(name, "OK");
        }
        print_step_complete(2, "Services wired", services.len());

        print_final_summary(self.repositories.len(), services.len());
        Ok(())
    }

    /// 핸들러에서 사용할 서비스를 `web::Data`로 등록합니다.
    pub fn configure_app_data(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.user_service.clone()))
            .app_data(web::Data::from(self.token_service.clone()))
            .app_data(web::Data::from(self.auth_service.clone()))
            .app_data(web::Data::from(self.category_service.clone()))
            .app_data(web::Data::from(self.product_service.clone()))
            .app_data(web::Data::from(self.order_service.clone()))
            .app_data(web::Data::from(self.payment_webhook_service.clone()))
            .app_data(web::Data::from(self.webhook_verifier.clone()))
            .app_data(web::Data::new(self.backend));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_in_memory_registry_initializes_every_repository() {
        let registry = ServiceRegistry::in_memory();
        assert_eq!(registry.backend(), StorageBackend::Memory);
        assert_eq!(registry.repositories.len(), 6);

        registry.initialize_all().await.unwrap();

        let names: Vec<&str> = registry.repositories.iter().map(|r| r.name()).collect();
        assert!(names.contains(&"webhook_log"));
        assert!(names.contains(&"order"));
    }
}
