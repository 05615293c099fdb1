//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 저장소, 서버, 환경, 페이지네이션 관련 설정
//! - [`auth_config`] - JWT, 관리자 계정 관련 설정
//! - [`payment_config`] - 결제 웹훅 서명 검증 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보(JWT 시크릿, 웹훅 시크릿)는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전하며, 사용 시 경고 로그를 남김
//! - 파싱 실패 시 기본값으로 대체
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, WebhookConfig};
//!
//! let env = Environment::current();
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let tolerance = WebhookConfig::tolerance_seconds();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export STORAGE_BACKEND="mongodb"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="commerce_dev"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export ADMIN_EMAILS="ops@example.com,owner@example.com"
//!
//! # 결제 웹훅
//! export PAYMENT_WEBHOOK_SECRET="shared-secret-with-payment-provider"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod payment_config;

pub use data_config::*;
pub use auth_config::*;
pub use payment_config::*;
