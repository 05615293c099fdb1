//! 인증 HTTP 핸들러
//!
//! - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인, 토큰 쌍 발급
//! - `POST /api/v1/auth/refresh` - 리프레시 토큰 회전
//! - `POST /api/v1/auth/logout` - 리프레시 세션 폐기 (인증 필요)

use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::users::request::{LoginRequest, RefreshTokenRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::auth::AuthService;

/// 로컬 로그인 핸들러
///
/// # 응답 (200 OK)
///
/// ```json
/// {
///   "user": { "id": "...", "email": "user@example.com", "roles": ["user"] },
///   "access_token": "eyJ...",
///   "refresh_token": "eyJ...",
///   "token_type": "Bearer",
///   "expires_in": 86400
/// }
/// ```
///
/// 이메일 없음, 비밀번호 불일치, 비활성 계정은 모두 401입니다.
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = auth_service.login(&payload.email, &payload.password).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신 핸들러
///
/// 현재 세션의 리프레시 토큰만 받으며, 사용한 토큰은 즉시 교체됩니다.
#[post("/refresh")]
pub async fn refresh_tokens(
    payload: web::Json<RefreshTokenRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = auth_service.refresh(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/logout")]
pub async fn logout(
    user: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    auth_service.logout(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("로그아웃되었습니다")))
}
