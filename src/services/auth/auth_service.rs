//! 로그인, 토큰 갱신, 로그아웃 흐름
//!
//! [`UserService`]로 사용자를 확인하고 [`TokenService`]로 토큰을 발급합니다.

use std::sync::Arc;
use crate::{
    domain::dto::users::response::{LoginResponse, TokenRefreshResponse},
    services::{auth::TokenService, users::UserService},
};
use crate::errors::errors::{AppError, AppResult};

pub struct AuthService {
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>, token_service: Arc<TokenService>) -> Self {
        Self { user_service, token_service }
    }

    /// 이메일/비밀번호 로그인
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let mut user = self.user_service.verify_password(email, password).await?;
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let tokens = self.token_service.issue_token_pair(&user_id, &user.roles).await?;

        if let Err(e) = self.user_service.record_login(&mut user).await {
            log::warn!("마지막 로그인 시각 기록 실패 - user_id: {}, 에러: {}", user_id, e);
        }

        log::info!("🔑 로그인 성공 - 사용자: {}, ID: {}", user.email, user_id);
        Ok(LoginResponse::new(user, tokens))
    }

    /// 리프레시 토큰을 회전시켜 새 토큰 쌍을 발급합니다.
    ///
    /// 역할은 토큰이 아니라 저장된 사용자에서 다시 읽으며, 비활성화된 계정은 거절합니다.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenRefreshResponse> {
        let claims = self.token_service.verify_refresh_token(refresh_token).await?;

        let user = self
            .user_service
            .find_active_user(&claims.sub)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::AuthenticationError("사용할 수 없는 계정입니다".to_string()),
                other => other,
            })?;

        let tokens = self.token_service.issue_token_pair(&claims.sub, &user.roles).await?;
        log::debug!("토큰 갱신 - user_id: {}", claims.sub);

        Ok(TokenRefreshResponse::from(tokens))
    }

    pub async fn logout(&self, user_id: &str) -> AppResult<()> {
        self.token_service.revoke(user_id).await?;
        log::info!("👋 로그아웃 - user_id: {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::users::request::CreateUserRequest;
    use crate::repositories::{tokens::InMemoryTokenRepository, users::InMemoryUserRepository};

    async fn setup() -> (AuthService, Arc<TokenService>) {
        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            vec![],
            4,
        ));
        let token_service = Arc::new(TokenService::new(
            Arc::new(InMemoryTokenRepository::new()),
            "test-secret".to_string(),
            3600,
            86400,
        ));

        user_service
            .create_user(CreateUserRequest {
                email: "buyer@example.com".to_string(),
                username: "buyer".to_string(),
                display_name: "Buyer".to_string(),
                password: "Password123".to_string(),
                password_confirm: "Password123".to_string(),
            })
            .await
            .unwrap();

        (AuthService::new(user_service, token_service.clone()), token_service)
    }

    #[actix_web::test]
    async fn test_login_records_last_login() {
        let (auth, _) = setup().await;
        let response = auth.login("buyer@example.com", "Password123").await.unwrap();

        assert!(response.user.last_login_at.is_some());
        assert_eq!(response.token_type, "Bearer");
    }

    #[actix_web::test]
    async fn test_refresh_rotates_and_logout_revokes() {
        let (auth, _) = setup().await;
        let login = auth.login("buyer@example.com", "Password123").await.unwrap();

        let refreshed = auth.refresh(&login.refresh_token).await.unwrap();
        assert!(auth.refresh(&login.refresh_token).await.is_err());

        auth.logout(&login.user.id).await.unwrap();
        assert!(auth.refresh(&refreshed.refresh_token).await.is_err());
    }
}
