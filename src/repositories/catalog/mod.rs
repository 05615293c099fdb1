//! 카탈로그 리포지토리 (카테고리, 상품)

pub mod category_repo;
pub mod product_repo;

pub use category_repo::{CategoryRepository, InMemoryCategoryRepository, MongoCategoryRepository};
pub use product_repo::{InMemoryProductRepository, MongoProductRepository, ProductFilter, ProductRepository};
