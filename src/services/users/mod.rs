//! 사용자 관리 서비스 모듈
//!
//! 사용자 등록, 비밀번호 인증, 조회를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일/사용자명 중복 방지
//! - 계정 존재 여부를 드러내지 않는 인증 실패 메시지

pub mod user_service;

pub use user_service::UserService;
