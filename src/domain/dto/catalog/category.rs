use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::catalog::category::Category;
use crate::utils::string_utils::{deserialize_optional_string, format_datetime};

/// 카테고리 생성 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 1000, message = "설명은 1000자 이하여야 합니다"))]
    pub description: Option<String>,
}

/// 카테고리 수정 요청 (지정한 필드만 변경)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1-100자 사이여야 합니다"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 1000, message = "설명은 1000자 이하여야 합니다"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id_string().unwrap_or_default(),
            name: category.name,
            description: category.description,
            created_at: format_datetime(&category.created_at),
            updated_at: format_datetime(&category.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_validation() {
        let req: CreateCategoryRequest =
            serde_json::from_str(r#"{"name": "Kitchen", "description": "   "}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.description, None);

        let req: CreateCategoryRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
