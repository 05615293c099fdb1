//! # User Data Transfer Objects Module
//!
//! 사용자 등록, 로그인, 토큰 갱신 API의 요청/응답 구조를 정의합니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── create_user.rs     # 회원가입 요청 (validator 규칙 포함)
//! │   └── auth_request.rs    # 로그인, 토큰 갱신 요청
//! └── response/
//!     └── user_response.rs   # 사용자 정보, 로그인/갱신 응답
//! ```
//!
//! ## 검증 규칙
//!
//! - **이메일**: 표준 이메일 형식
//! - **사용자명**: 3-30자, 영문/숫자/언더스코어만 허용
//! - **표시이름**: 1-50자
//! - **비밀번호**: 최소 8자, 대소문자와 숫자 포함, 확인 값과 일치
//!
//! ## 로그인 응답 예제
//!
//! ```json
//! {
//!   "user": {
//!     "id": "507f1f77bcf86cd799439011",
//!     "email": "user@example.com",
//!     "username": "john_doe",
//!     "display_name": "John Doe",
//!     "is_active": true,
//!     "roles": ["user"]
//!   },
//!   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "refresh_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "token_type": "Bearer",
//!   "expires_in": 86400
//! }
//! ```
//!
//! 응답 DTO에는 비밀번호 해시가 포함되지 않습니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
