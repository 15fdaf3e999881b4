//! Page request and page response shapes shared by paged list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// `?page=0&size=10`; pages are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page number
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub page: u64,

    /// Items per page
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "El tamaño de página debe estar entre 1 y 100"))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub size: u64,
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageParams {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, params: PageParams, total_elements: u64) -> Self {
        Self {
            content,
            page_number: params.page,
            page_size: params.size,
            total_elements,
            total_pages: total_elements.div_ceil(params.size.max(1)),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    /// Slice an already sorted, fully loaded collection.
    pub fn from_sorted(items: Vec<T>, params: PageParams) -> Self {
        let total = items.len() as u64;
        let content = items
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.size as usize)
            .collect();
        Self::new(content, params, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PageResponse::new(vec![1; 10], PageParams::new(0, 10), 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content.len(), 10);

        let empty: PageResponse<i32> = PageResponse::new(vec![], PageParams::default(), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_from_sorted_slices_requested_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = PageResponse::from_sorted(items, PageParams::new(2, 10));
        assert_eq!(page.content, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.page_number, 2);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let page = PageResponse::from_sorted(vec![1, 2, 3], PageParams::new(5, 10));
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_map_keeps_totals() {
        let page = PageResponse::new(vec![1, 2], PageParams::new(1, 2), 4).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_params_defaults_and_validation() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, PageParams::default());
        assert!(PageParams::new(0, 0).validate().is_err());
        assert!(PageParams::new(0, 101).validate().is_err());
        assert!(PageParams::new(3, 100).validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(PageResponse::new(vec!["a"], PageParams::default(), 1)).unwrap();
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalPages"], 1);
    }
}
