//! # Domain Models Module
//!
//! 저장되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ```text
//! models/
//! ├── auth/        ← 인증된 사용자 추출자, 역할 요구사항
//! ├── token/       ← JWT 클레임과 토큰 쌍
//! └── pagination   ← 페이지 계산
//! ```

pub mod auth;
pub mod token;
pub mod pagination;
