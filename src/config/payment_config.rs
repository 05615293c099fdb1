//! 결제 웹훅 설정 모듈
//!
//! 결제 대행사와 공유하는 HMAC 시크릿, 서명 헤더 이름,
//! 타임스탬프 허용 오차를 관리합니다.

use std::env;

/// 결제 웹훅 서명 검증 설정
pub struct WebhookConfig;

impl WebhookConfig {
    /// HMAC-SHA256 공유 시크릿
    pub fn secret() -> String {
        env::var("PAYMENT_WEBHOOK_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("PAYMENT_WEBHOOK_SECRET not set, using default (not secure for production!)");
                "payment-webhook-secret".to_string()
            })
    }

    /// 서명이 담기는 요청 헤더 (기본값: `X-Webhook-Signature`)
    pub fn signature_header() -> String {
        env::var("PAYMENT_WEBHOOK_SIGNATURE_HEADER")
            .unwrap_or_else(|_| "X-Webhook-Signature".to_string())
    }

    /// 웹훅 타임스탬프 허용 오차 (초, 기본값 300)
    pub fn tolerance_seconds() -> i64 {
        env::var("PAYMENT_WEBHOOK_TOLERANCE_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &i64| *secs > 0)
            .unwrap_or(300)
    }
}
