//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 문자열 검증, ObjectId 파싱, 날짜 포맷
//! - [`display_terminal`] - 시작 과정 터미널 출력

pub mod string_utils;
pub mod display_terminal;
