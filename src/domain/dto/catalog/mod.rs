//! 카탈로그(카테고리, 상품, 상품 옵션) 요청/응답 DTO

pub mod category;
pub mod product;

pub use category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
pub use product::{
    CreateProductRequest, CreateVariantRequest, ProductListQuery, ProductResponse,
    UpdateProductRequest, UpdateVariantRequest, VariantResponse,
};
