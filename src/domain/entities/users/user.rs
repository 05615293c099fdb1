//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 이메일/패스워드 기반의 로컬 계정과 역할 목록을 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 기본 사용자 역할
pub const ROLE_USER: &str = "user";
/// 관리자 역할 (카탈로그 관리, 주문 상태 변경)
pub const ROLE_ADMIN: &str = "admin";

/// 사용자 엔티티
///
/// 주문을 생성하고 관리 API를 호출하는 계정을 표현합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 소문자 정규화)
    pub email: String,
    /// 사용자 이름 (unique)
    pub username: String,
    /// 표시 이름
    pub display_name: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 계정 활성화 여부
    pub is_active: bool,
    /// 사용자 역할
    pub roles: Vec<String>,
    /// 마지막 로그인 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    ///
    /// `is_admin`이 참이면 `admin` 역할이 함께 부여됩니다.
    pub fn new_local(
        email: String,
        username: String,
        display_name: String,
        password_hash: String,
        is_admin: bool,
    ) -> Self {
        let now = DateTime::now();

        let mut roles = vec![ROLE_USER.to_string()];
        if is_admin {
            roles.push(ROLE_ADMIN.to_string());
        }

        Self {
            id: None,
            email,
            username,
            display_name,
            password_hash,
            is_active: true,
            roles,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 로그인 시각 기록
    pub fn record_login(&mut self) {
        let now = DateTime::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}
