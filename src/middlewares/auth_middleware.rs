//! JWT 인증 미들웨어
//!
//! 스코프 단위로 Bearer 액세스 토큰을 검증하고 역할 요구사항을 확인합니다.
//! 토큰 검증에는 `configure_app_data`로 등록된 `web::Data<TokenService>`를 사용합니다.
//!
//! ```rust,ignore
//! web::scope("/api/v1/admin")
//!     .wrap(AuthMiddleware::required_with_role(ROLE_ADMIN))
//!     .service(handlers::categories::create_category)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 접근에 필요한 역할 (없으면 유효한 토큰만 확인)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 유효한 액세스 토큰만 요구합니다.
    pub fn required() -> Self {
        Self { required_role: None }
    }

    pub fn new_with_role(required_role: RequiredRole) -> Self {
        Self { required_role: Some(required_role) }
    }

    /// 특정 역할 요구 인증 미들웨어 생성
    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(RequiredRole::Single(role.to_string()))
    }

    /// 복수 역할 중 하나 요구 인증 미들웨어 생성
    pub fn required_with_roles(roles: Vec<&str>) -> Self {
        let role_strings: Vec<String> = roles.into_iter().map(|s| s.to_string()).collect();
        Self::new_with_role(RequiredRole::Any(role_strings))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{get, http::StatusCode, test, web, App, HttpResponse};
    use crate::domain::entities::users::user::{ROLE_ADMIN, ROLE_USER};
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::repositories::tokens::InMemoryTokenRepository;
    use crate::services::auth::TokenService;
    use super::*;

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            Arc::new(InMemoryTokenRepository::new()),
            "middleware-secret".to_string(),
            3600,
            3600,
        ))
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(token_service()))
                .service(web::scope("").wrap(AuthMiddleware::required()).service(whoami)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let tokens = token_service();
        let pair = tokens.issue_token_pair("user-7", &[ROLE_USER.to_string()]).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(tokens))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware::required_with_roles(vec![ROLE_USER, ROLE_ADMIN]))
                        .service(whoami),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"user-7"));
    }

    #[actix_web::test]
    async fn test_missing_role_is_forbidden() {
        let tokens = token_service();
        let pair = tokens.issue_token_pair("user-7", &[ROLE_USER.to_string()]).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(tokens))
                .service(web::scope("").wrap(AuthMiddleware::required_with_role(ROLE_ADMIN)).service(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted() {
        let tokens = token_service();
        let pair = tokens.issue_token_pair("user-7", &[ROLE_USER.to_string()]).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(tokens))
                .service(web::scope("").wrap(AuthMiddleware::required()).service(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
