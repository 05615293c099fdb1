//! 인증 관련 설정 모듈
//!
//! JWT 토큰 발급과 관리자 계정 지정에 필요한 설정값을 제공합니다.
//!
//! # 환경 변수
//!
//! ```bash
//! JWT_SECRET="your-super-secret-key"
//! JWT_EXPIRATION_HOURS=24
//! JWT_REFRESH_EXPIRATION_DAYS=7
//! ADMIN_EMAILS="ops@example.com,owner@example.com"
//! ```

use std::env;

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 토큰 서명용 시크릿 키
    ///
    /// 설정되지 않은 경우 개발용 기본값을 사용하며 경고를 남깁니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰 유효 시간 (시간 단위, 기본값 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    /// 리프레시 토큰 유효 기간 (일 단위, 기본값 7)
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}

/// 관리자 계정 설정
///
/// `ADMIN_EMAILS`에 포함된 이메일로 가입한 사용자에게 `admin` 역할이 부여됩니다.
pub struct AdminConfig;

impl AdminConfig {
    pub fn emails() -> Vec<String> {
        env::var("ADMIN_EMAILS")
            .map(|raw| Self::parse_emails(&raw))
            .unwrap_or_default()
    }

    /// 쉼표로 구분된 이메일 목록을 파싱합니다. (소문자 정규화, 빈 항목 제거)
    pub fn parse_emails(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect()
    }
}
