//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! let user = User::new_local(
//!     "user@example.com".to_string(),
//!     "username".to_string(),
//!     "Display Name".to_string(),
//!     hashed_password,
//!     false,
//! );
//! ```

pub mod user;
