//! 分页参数与分页响应 (配合 sea-orm `Paginator` 使用)

use sea_orm::ItemsAndPagesNumber;
use serde::{Deserialize, Serialize};

const DEFAULT_PER_PAGE: u64 = 20;
const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaginationParams {
    /// 页码, 从 1 开始
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PaginationParams {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self { page, per_page }
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// `Paginator::fetch_page` 使用的页下标 (从 0 开始)
    pub fn page_index(&self) -> u64 {
        self.page() - 1
    }

    /// 请求的页是否落在已有页数之内; 超出时不必再查询
    pub fn is_within(&self, counts: &ItemsAndPagesNumber) -> bool {
        self.page_index() < counts.number_of_pages
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, params: &PaginationParams, counts: ItemsAndPagesNumber) -> Self {
        Self {
            items,
            page: params.page(),
            per_page: params.per_page(),
            total: counts.number_of_items,
            total_pages: counts.number_of_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(items: u64, pages: u64) -> ItemsAndPagesNumber {
        ItemsAndPagesNumber {
            number_of_items: items,
            number_of_pages: pages,
        }
    }

    #[test]
    fn test_pagination_params_defaults_and_clamping() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);
        assert_eq!(params.page_index(), 0);

        let params = PaginationParams::new(Some(0), Some(1000));
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 100);
    }

    #[test]
    fn test_huge_page_is_out_of_range() {
        let params = PaginationParams::new(Some(u64::MAX), Some(20));
        assert_eq!(params.page_index(), u64::MAX - 1);
        assert!(!params.is_within(&counts(25, 2)));
        assert!(PaginationParams::new(Some(2), Some(20)).is_within(&counts(25, 2)));
        assert!(!PaginationParams::default().is_within(&counts(0, 0)));
    }
}
