//! # User HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users` | 회원가입 | 201 Created |
//! | `GET` | `/api/v1/me` | 현재 사용자 조회 (인증 필요) | 200 OK |

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::users::request::CreateUserRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::users::UserService;

/// 사용자 생성 핸들러
///
/// # 요청 본문
///
/// ```json
/// {
///   "email": "user@example.com",
///   "username": "john_doe",
///   "display_name": "John Doe",
///   "password": "Secure123",
///   "password_confirm": "Secure123"
/// }
/// ```
///
/// # 응답
///
/// * `201 Created` - `{ "user": {...}, "message": "..." }`
/// * `400 Bad Request` - 검증 실패 (비밀번호 규칙, 확인 불일치 등)
/// * `409 Conflict` - 이메일 또는 사용자명 중복
#[post("")]
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = user_service.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 인증된 사용자 본인의 정보를 조회합니다.
#[get("")]
pub async fn get_current_user(
    user: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let response = user_service.get_user(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};
    use crate::handlers::test_support::{bearer, test_registry};

    fn signup_body(email: &str, username: &str) -> Value {
        json!({
            "email": email,
            "username": username,
            "display_name": "Tester",
            "password": "Password123",
            "password_confirm": "Password123"
        })
    }

    #[actix_web::test]
    async fn test_signup_returns_created_and_conflict_on_duplicate() {
        let registry = test_registry();
        let app = init_app!(registry);

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(signup_body("new@example.com", "newbie"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(signup_body("new@example.com", "other"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_signup_rejects_password_mismatch() {
        let registry = test_registry();
        let app = init_app!(registry);

        let mut body = signup_body("mismatch@example.com", "mismatch");
        body["password_confirm"] = json!("Password999");
        let req = test::TestRequest::post().uri("/api/v1/users").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_me_requires_token() {
        let registry = test_registry();
        let app = init_app!(registry);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let created = registry
            .user_service
            .create_user(serde_json::from_value(signup_body("me@example.com", "me_user")).unwrap())
            .await
            .unwrap();
        let token = bearer(&registry, &created.user.id, &created.user.roles).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("Authorization", token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["email"], "me@example.com");
    }
}
