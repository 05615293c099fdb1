//! 결제 웹훅 서명 검증
//!
//! 결제 대행사는 원본 요청 바디의 HMAC-SHA256을 공유 비밀키로 계산해
//! 16진수 문자열로 서명 헤더(기본 `X-Webhook-Signature`)에 담아 보냅니다.
//! 바디의 `timestamp`가 허용 오차(기본 300초)를 벗어나면 재전송 공격으로 보고 거절합니다.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use crate::config::WebhookConfig;
use crate::errors::errors::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct WebhookSignatureVerifier {
    secret: String,
    signature_header: String,
    tolerance_seconds: i64,
}

impl WebhookSignatureVerifier {
    pub fn new(secret: String, signature_header: String, tolerance_seconds: i64) -> Self {
        Self { secret, signature_header, tolerance_seconds }
    }

    pub fn from_config() -> Self {
        Self::new(
            WebhookConfig::secret(),
            WebhookConfig::signature_header(),
            WebhookConfig::tolerance_seconds(),
        )
    }

    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| AppError::InternalError("웹훅 비밀키가 올바르지 않습니다".to_string()))
    }

    /// 바디의 16진수 HMAC-SHA256 서명
    pub fn sign(&self, body: &[u8]) -> AppResult<String> {
        let mut mac = self.mac()?;
        mac.update(body);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// 서명 헤더 값이 바디와 일치하는지 상수 시간으로 비교합니다.
    pub fn verify(&self, body: &[u8], signature: &str) -> AppResult<bool> {
        let expected = self.sign(body)?;
        let provided = signature.trim().to_ascii_lowercase();

        // 길이는 비밀이 아님 (SHA-256은 항상 64자)
        if expected.len() != provided.len() {
            return Ok(false);
        }

        Ok(expected.as_bytes().ct_eq(provided.as_bytes()).into())
    }

    /// `|now - timestamp|`가 허용 오차 이내인지 확인합니다.
    pub fn verify_timestamp(&self, timestamp: i64, now: i64) -> bool {
        now.abs_diff(timestamp) <= self.tolerance_seconds.max(0) as u64
    }
}
