//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소마다 하나의 trait과 두 가지 구현을 제공합니다.
//!
//! - `Mongo*Repository`: MongoDB(+ Redis) 기반 운영용 구현
//! - `InMemory*Repository`: 프로세스 메모리 기반 구현 (로컬 실행, 테스트)
//!
//! 두 구현은 같은 유일성 규칙을 지키며, 서비스는 `Arc<dyn ...Repository>`만 알고 있습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::orders::order_repo::{InMemoryOrderRepository, OrderRepository};
//!
//! let order_repo: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
//! let order = order_repo.find_by_id(&order_id).await?;
//! ```

pub mod users;
pub mod tokens;
pub mod catalog;
pub mod orders;
