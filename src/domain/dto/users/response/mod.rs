//! # 사용자 관련 응답 DTO 모듈
//!
//! 비밀번호 해시 같은 민감한 정보는 응답에서 제외합니다.

pub mod user_response;

pub use user_response::{UserResponse, CreateUserResponse, LoginResponse, TokenRefreshResponse};
