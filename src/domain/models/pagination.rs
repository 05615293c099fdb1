//! 목록 조회 페이지네이션 계산
//!
//! 요청의 `page`, `page_size`를 정규화하고 skip/limit와 전체 페이지 수를 계산합니다.

use serde::Deserialize;

use crate::config::PaginationConfig;

/// `?page=&page_size=` 쿼리 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// 정규화된 페이지 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1부터 시작하는 페이지 번호
    pub page: u64,
    pub page_size: u64,
}

impl Pagination {
    /// 환경 설정의 기본/최대 페이지 크기를 적용합니다.
    pub fn from_query(query: &PageQuery) -> Self {
        Self::new(
            query.page,
            query.page_size,
            PaginationConfig::default_page_size(),
            PaginationConfig::max_page_size(),
        )
    }

    /// `page`는 최소 1, `page_size`는 `1..=max_page_size`로 보정합니다.
    pub fn new(page: Option<u64>, page_size: Option<u64>, default_page_size: u64, max_page_size: u64) -> Self {
        let max_page_size = max_page_size.max(1);
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(default_page_size)
            .clamp(1, max_page_size);

        Self { page, page_size }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.page_size)
    }
}
