//! 카테고리 HTTP 핸들러
//!
//! 조회는 공개, 생성/수정/삭제는 `/api/v1/admin/categories` 아래 관리자 전용입니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::domain::dto::catalog::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::models::pagination::{PageQuery, Pagination};
use crate::errors::errors::AppError;
use crate::services::catalog::CategoryService;

/// `GET /api/v1/categories?page=&page_size=`
#[get("")]
pub async fn list_categories(
    query: web::Query<PageQuery>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let page = category_service
        .list_categories(Pagination::from_query(&query))
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{category_id}")]
pub async fn get_category(
    category_id: web::Path<String>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let category = category_service.get_category(&category_id).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// 이름이 이미 있으면 409
#[post("")]
pub async fn create_category(
    payload: web::Json<CreateCategoryRequest>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = category_service.create_category(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/{category_id}")]
pub async fn update_category(
    category_id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = category_service
        .update_category(&category_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// 상품이 참조 중인 카테고리는 삭제할 수 없습니다 (409).
#[delete("/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<String>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    category_service.delete_category(&category_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
