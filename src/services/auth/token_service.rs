//! JWT 토큰 관리 서비스 구현
//!
//! HMAC-SHA256(HS256)으로 서명한 액세스/리프레시 토큰을 발급하고 검증합니다.
//! 리프레시 토큰의 `jti`는 [`TokenRepository`]에 사용자별로 하나만 기록되며,
//! 갱신할 때마다 교체되어 이전 리프레시 토큰은 다시 쓸 수 없습니다.

use std::sync::Arc;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use crate::{
    domain::models::token::{TokenClaims, TokenPair, TokenType},
    repositories::tokens::TokenRepository,
};
use crate::errors::errors::{AppError, AppResult};

pub struct TokenService {
    token_repo: Arc<dyn TokenRepository>,
    secret: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenService {
    pub fn new(
        token_repo: Arc<dyn TokenRepository>,
        secret: String,
        access_ttl_seconds: i64,
        refresh_ttl_seconds: i64,
    ) -> Self {
        Self { token_repo, secret, access_ttl_seconds, refresh_ttl_seconds }
    }

    fn encode_claims(&self, claims: &TokenClaims) -> AppResult<String> {
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&Header::default(), claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    fn build_claims(&self, user_id: &str, roles: &[String], token_type: TokenType) -> TokenClaims {
        let now = Utc::now().timestamp();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_seconds,
            TokenType::Refresh => self.refresh_ttl_seconds,
        };

        TokenClaims {
            sub: user_id.to_string(),
            roles: roles.to_vec(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + ttl,
        }
    }

    /// 토큰 쌍을 발급하고 리프레시 세션을 새 `jti`로 교체합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let tokens = token_service.issue_token_pair(&user_id, &user.roles).await?;
    /// println!("Expires in: {} seconds", tokens.expires_in);
    /// ```
    pub async fn issue_token_pair(&self, user_id: &str, roles: &[String]) -> AppResult<TokenPair> {
        let access_claims = self.build_claims(user_id, roles, TokenType::Access);
        let refresh_claims = self.build_claims(user_id, roles, TokenType::Refresh);

        let access_token = self.encode_claims(&access_claims)?;
        let refresh_token = self.encode_claims(&refresh_claims)?;

        self.token_repo
            .store_refresh_token(user_id, &refresh_claims.jti, self.refresh_ttl_seconds.max(0) as u64)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_ttl_seconds,
        })
    }

    /// 서명과 만료를 검증하고 클레임을 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 서명 불일치, 형식 오류
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
            })
    }

    /// 액세스 토큰만 허용합니다. 리프레시 토큰으로 API를 호출할 수 없습니다.
    pub fn verify_access_token(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::AuthenticationError("액세스 토큰이 아닙니다".to_string()));
        }
        Ok(claims)
    }

    /// 리프레시 토큰을 검증하고, 사용자의 현재 세션과 일치하는지 확인합니다.
    pub async fn verify_refresh_token(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::AuthenticationError("리프레시 토큰이 아닙니다".to_string()));
        }

        if !self.token_repo.is_current_refresh_token(&claims.sub, &claims.jti).await? {
            log::warn!("🔒 폐기되었거나 교체된 리프레시 토큰 사용 시도 - user_id: {}", claims.sub);
            return Err(AppError::AuthenticationError("만료되었거나 폐기된 리프레시 토큰입니다".to_string()));
        }

        Ok(claims)
    }

    /// 사용자의 리프레시 세션을 폐기합니다.
    pub async fn revoke(&self, user_id: &str) -> AppResult<()> {
        self.token_repo.delete_refresh_token(user_id).await
    }

    /// `Authorization` 헤더의 "Bearer {token}"에서 토큰 부분만 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::tokens::InMemoryTokenRepository;

    fn service() -> TokenService {
        TokenService::new(
            Arc::new(InMemoryTokenRepository::new()),
            "test-secret".to_string(),
            3600,
            7 * 86400,
        )
    }

    fn roles() -> Vec<String> {
        vec!["user".to_string()]
    }

    #[actix_web::test]
    async fn test_issue_and_verify_access_token() {
        let service = service();
        let pair = service.issue_token_pair("user-1", &roles()).await.unwrap();

        let claims = service.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.roles, roles());
        assert_eq!(pair.expires_in, 3600);

        assert!(service.verify_access_token(&pair.refresh_token).is_err());
    }

    #[actix_web::test]
    async fn test_refresh_token_rotation() {
        let service = service();
        let first = service.issue_token_pair("user-1", &roles()).await.unwrap();
        assert!(service.verify_refresh_token(&first.refresh_token).await.is_ok());

        let second = service.issue_token_pair("user-1", &roles()).await.unwrap();
        let stale = service.verify_refresh_token(&first.refresh_token).await;
        assert!(matches!(stale, Err(AppError::AuthenticationError(_))));
        assert!(service.verify_refresh_token(&second.refresh_token).await.is_ok());

        service.revoke("user-1").await.unwrap();
        assert!(service.verify_refresh_token(&second.refresh_token).await.is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new(
            Arc::new(InMemoryTokenRepository::new()),
            "other-secret".to_string(),
            3600,
            3600,
        );
        let claims = other.build_claims("user-1", &roles(), TokenType::Access);
        let token = other.encode_claims(&claims).unwrap();

        assert!(matches!(service().verify_token(&token), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();
        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
