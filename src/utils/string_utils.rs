//! # 문자열 유틸리티
//!
//! 요청 값 정리, ID 파싱, 시간 포맷팅 등 계층 간에 공통으로 쓰이는 함수들입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::Deserialize;
use crate::errors::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  Mugs  ", "name").unwrap(), "Mugs");
/// assert!(validate_required_string("   ", "name").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용하며,
/// 빈 문자열이나 공백뿐인 값을 `None`으로 바꿉니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 24자리 16진수 문자열을 ObjectId로 파싱합니다.
///
/// 형식이 맞지 않으면 필드 이름을 담은 ValidationError를 반환합니다.
pub fn parse_object_id(value: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim()).map_err(|_| {
        AppError::ValidationError(format!("유효하지 않은 {} 형식입니다: {}", field_name, value))
    })
}

/// BSON 시간을 RFC 3339 문자열로 변환합니다. (응답 DTO용)
pub fn format_datetime(value: &DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}
