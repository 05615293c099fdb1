//! 커머스 백엔드 서비스
//!
//! 상품 카탈로그, 주문, 결제 웹훅 처리를 제공하는 Actix-web 기반 REST API입니다.
//!
//! # Features
//!
//! - **결제 웹훅**: HMAC-SHA256 서명 검증, 거래 ID 기반 멱등 처리, 실패 시 재시도 정보 기록
//! - **주문**: 가격 스냅샷, 상태 머신(`pending` → `completed` / `cancelled`)
//! - **카탈로그**: 카테고리, 상품, 상품 옵션(SKU, 가격 오버라이드)
//! - **인증**: bcrypt 비밀번호, HS256 JWT 액세스/리프레시 토큰, 역할 기반 접근 제어
//! - **저장소**: MongoDB + Redis, 또는 프로세스 메모리 (`STORAGE_BACKEND=memory`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 스코프별 AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← DTO 검증, 웹훅 서명 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 규칙 (ServiceRegistry가 조립)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← trait + MongoDB/메모리 구현
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use commerce_service_backend::core::registry::ServiceRegistry;
//!
//! let registry = ServiceRegistry::in_memory();
//! registry.initialize_all().await?;
//!
//! let outcome = registry.payment_webhook_service.process_webhook(&request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
