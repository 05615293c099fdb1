//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 비밀번호 인증, 사용자 조회를 담당합니다.
//!
//! ```text
//! UserService
//!   ├─ create_user      bcrypt 해싱 → 역할 결정(ADMIN_EMAILS) → 저장
//!   ├─ verify_password  이메일 조회 → bcrypt 검증 → 활성 상태 확인
//!   ├─ record_login     last_login_at 갱신
//!   └─ get_user         id 조회 → UserResponse
//!         │
//!         ▼
//!   dyn UserRepository (MongoDB + Redis 캐시 / 메모리)
//! ```
//!
//! ## 보안
//!
//! - bcrypt cost는 환경별로 다릅니다 (`PasswordConfig`).
//! - 존재하지 않는 이메일과 틀린 비밀번호는 같은 메시지로 거절합니다.

use std::sync::Arc;
use std::time::Instant;
use bcrypt::hash;
use crate::{
    domain::{
        dto::users::{
            request::CreateUserRequest,
            response::{CreateUserResponse, UserResponse},
        },
        entities::users::user::User,
    },
    repositories::users::UserRepository,
    utils::string_utils::parse_object_id,
};
use crate::errors::errors::{AppError, AppResult, ErrorContext};

const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    admin_emails: Vec<String>,
    bcrypt_cost: u32,
}

impl UserService {
    /// `admin_emails`에 포함된 이메일로 가입하면 관리자 역할이 추가됩니다.
    pub fn new(user_repo: Arc<dyn UserRepository>, admin_emails: Vec<String>, bcrypt_cost: u32) -> Self {
        Self { user_repo, admin_emails, bcrypt_cost }
    }

    fn is_admin_email(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }

    /// 검증을 통과한 요청으로 로컬 계정을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 또는 사용자명 중복
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<CreateUserResponse> {
        let start_time = Instant::now();

        let hash_start = Instant::now();
        let password_hash = hash(&request.password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let email = request.email.trim().to_lowercase();
        let is_admin = self.is_admin_email(&email);

        let user = User::new_local(
            email,
            request.username,
            request.display_name,
            password_hash,
            is_admin,
        );

        let created_user = self.user_repo.create(user).await?;

        if is_admin {
            log::info!("👑 관리자 계정 생성: {}", created_user.email);
        }
        log::info!("Total user creation took: {:?}", start_time.elapsed());

        Ok(CreateUserResponse {
            user: UserResponse::from(created_user),
            message: "사용자가 성공적으로 생성되었습니다".to_string(),
        })
    }

    pub async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        let user = self.find_active_user(id).await?;
        Ok(UserResponse::from(user))
    }

    /// id로 활성 사용자를 찾습니다. 없거나 비활성이면 `NotFound`.
    pub async fn find_active_user(&self, id: &str) -> AppResult<User> {
        let object_id = parse_object_id(id, "user_id")?;

        self.user_repo
            .find_by_id(&object_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 이메일과 비밀번호로 사용자를 인증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 계정 없음, 비밀번호 불일치, 비활성 계정
    pub async fn verify_password(&self, email: &str, password: &str) -> AppResult<User> {
        let start_time = Instant::now();
        let email = email.trim().to_lowercase();

        let user = self.user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let is_valid = bcrypt::verify(password, &user.password_hash)
            .with_context(|| format!("비밀번호 검증 실패 ({})", email))?;

        if !is_valid {
            log::warn!("🔒 비밀번호 불일치: {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            return Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string()));
        }

        log::debug!("Total password verification took: {:?}", start_time.elapsed());
        Ok(user)
    }

    /// 마지막 로그인 시각을 기록합니다.
    pub async fn record_login(&self, user: &mut User) -> AppResult<()> {
        user.record_login();
        self.user_repo.update(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::ROLE_ADMIN;
    use crate::repositories::users::InMemoryUserRepository;

    fn service(admin_emails: Vec<String>) -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()), admin_emails, 4)
    }

    fn request(email: &str, username: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            username: username.to_string(),
            display_name: "Tester".to_string(),
            password: "Password123".to_string(),
            password_confirm: "Password123".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_create_user_assigns_admin_role_from_config() {
        let service = service(vec!["ops@example.com".to_string()]);

        let admin = service.create_user(request("Ops@Example.com", "ops")).await.unwrap();
        assert!(admin.user.roles.iter().any(|r| r == ROLE_ADMIN));
        assert_eq!(admin.user.email, "ops@example.com");

        let plain = service.create_user(request("user@example.com", "user")).await.unwrap();
        assert!(!plain.user.roles.iter().any(|r| r == ROLE_ADMIN));
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict() {
        let service = service(vec![]);
        service.create_user(request("dup@example.com", "first")).await.unwrap();

        let result = service.create_user(request("dup@example.com", "second")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_verify_password() {
        let service = service(vec![]);
        service.create_user(request("login@example.com", "login")).await.unwrap();

        let user = service.verify_password("login@example.com", "Password123").await.unwrap();
        assert_eq!(user.username, "login");

        let wrong = service.verify_password("login@example.com", "Password999").await;
        assert!(matches!(wrong, Err(AppError::AuthenticationError(_))));

        let unknown = service.verify_password("ghost@example.com", "Password123").await;
        assert!(matches!(unknown, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_get_user_rejects_malformed_id() {
        let service = service(vec![]);
        assert!(matches!(service.get_user("not-an-id").await, Err(AppError::ValidationError(_))));
    }
}
