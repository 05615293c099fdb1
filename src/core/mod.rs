//! # Core Module
//!
//! 애플리케이션 조립과 저장소 생명주기를 담당합니다.
//!
//! - [`registry`] - [`ServiceRegistry`]가 저장소 구현(MongoDB/메모리)을 고르고
//!   서비스에 생성자로 주입한 뒤 `web::Data`로 등록합니다.

pub mod registry;

pub use registry::{Repository, ServiceRegistry, ServiceSettings};
