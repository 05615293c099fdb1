//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/  ← MongoDB 문서와 매핑되는 엔티티
//! ├── dto/       ← HTTP 요청/응답 본문
//! └── models/    ← 토큰, 인증 사용자, 페이지네이션 등 저장되지 않는 모델
//! ```

pub mod entities;
pub mod dto;
pub mod models;
