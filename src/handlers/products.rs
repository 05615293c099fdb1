//! 상품과 상품 옵션 HTTP 핸들러
//!
//! | 메서드 | 경로 | 권한 |
//! |--------|------|------|
//! | `GET` | `/api/v1/products?page&page_size&category_id` | 공개 (판매 중인 상품만) |
//! | `GET` | `/api/v1/products/{id}` | 공개 |
//! | `POST` | `/api/v1/admin/products` | 관리자 |
//! | `PUT` / `DELETE` | `/api/v1/admin/products/{id}` | 관리자 |
//! | `POST` | `/api/v1/admin/products/{id}/variants` | 관리자 |
//! | `PUT` / `DELETE` | `/api/v1/admin/products/{id}/variants/{variant_id}` | 관리자 |

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::domain::dto::catalog::{
    CreateProductRequest, CreateVariantRequest, ProductListQuery, UpdateProductRequest,
    UpdateVariantRequest,
};
use crate::domain::models::pagination::{PageQuery, Pagination};
use crate::errors::errors::AppError;
use crate::services::catalog::ProductService;

#[get("")]
pub async fn list_products(
    query: web::Query<ProductListQuery>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let pagination = Pagination::from_query(&PageQuery {
        page: query.page,
        page_size: query.page_size,
    });

    let page = product_service
        .list_products(pagination, query.category_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{product_id}")]
pub async fn get_product(
    product_id: web::Path<String>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let product = product_service.get_product(&product_id).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// 상품 생성
///
/// 존재하지 않는 `category_id`는 400, 요청 안의 중복 SKU는 409입니다.
#[post("")]
pub async fn create_product(
    payload: web::Json<CreateProductRequest>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = product_service.create_product(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

/// 부분 수정. 지정한 필드만 바뀝니다.
#[put("/{product_id}")]
pub async fn update_product(
    product_id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = product_service
        .update_product(&product_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<String>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    product_service.delete_product(&product_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{product_id}/variants")]
pub async fn add_variant(
    product_id: web::Path<String>,
    payload: web::Json<CreateVariantRequest>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = product_service
        .add_variant(&product_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(product))
}

#[put("/{product_id}/variants/{variant_id}")]
pub async fn update_variant(
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateVariantRequest>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let (product_id, variant_id) = path.into_inner();

    let product = product_service
        .update_variant(&product_id, &variant_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{product_id}/variants/{variant_id}")]
pub async fn remove_variant(
    path: web::Path<(String, String)>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let (product_id, variant_id) = path.into_inner();

    let product = product_service.remove_variant(&product_id, &variant_id).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};
    use crate::handlers::test_support::{admin_bearer, test_registry};

    #[actix_web::test]
    async fn test_product_lifecycle_through_admin_routes() {
        let registry = test_registry();
        let app = init_app!(registry);
        let admin = admin_bearer(&registry).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/products")
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({
                "name": "Organic Cotton T-Shirt",
                "price": "19.90",
                "variants": [{ "sku": "TS-RED-M", "name": "Red / M" }]
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let product_id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/admin/products/{}/variants", product_id))
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "sku": "TS-GOLD-M", "name": "Gold / M", "price_override": "29.90" }))
            .to_request();
        let with_variant: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(with_variant["variants"].as_array().unwrap().len(), 2);

        // 같은 상품 안의 SKU 중복
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/admin/products/{}/variants", product_id))
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "sku": "TS-RED-M", "name": "Again" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/products/{}", product_id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/admin/products/{}", product_id))
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "is_active": false }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // 판매 중지 상품은 공개 조회에서 보이지 않음
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/products/{}", product_id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/products/{}", product_id))
            .insert_header(("Authorization", admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_create_product_validation_and_unknown_category() {
        let registry = test_registry();
        let app = init_app!(registry);
        let admin = admin_bearer(&registry).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/products")
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "name": "Mug", "price": -1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/products")
            .insert_header(("Authorization", admin))
            .set_json(json!({ "name": "Mug", "price": 5, "category_id": "64b7f0c2a1b2c3d4e5f60718" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_public_list_filters_by_category() {
        let registry = test_registry();
        let app = init_app!(registry);
        let admin = admin_bearer(&registry).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/categories")
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "name": "Mugs" }))
            .to_request();
        let category: Value = test::call_and_read_body_json(&app, req).await;
        let category_id = category["id"].as_str().unwrap().to_string();

        for (name, category) in [("Blue Mug", Some(category_id.clone())), ("Poster", None)] {
            let req = test::TestRequest::post()
                .uri("/api/v1/admin/products")
                .insert_header(("Authorization", admin.clone()))
                .set_json(json!({ "name": name, "price": 10, "category_id": category }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/products?category_id={}", category_id))
            .to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["total_items"], 1);
        assert_eq!(page["items"][0]["name"], "Blue Mug");

        // 상품이 참조 중인 카테고리 삭제
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/categories/{}", category_id))
            .insert_header(("Authorization", admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }
}
