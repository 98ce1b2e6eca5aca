use serde::Serialize;

/// Effective page window after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Number of rows to skip before this page starts. Saturates, so a
    /// page far past the end just skips everything.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            page_size: request.page_size,
            total_pages: total_count.div_ceil(request.page_size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = PageRequest { page: 1, page_size: 10 };
        let result = PaginatedResult::new(Vec::<u8>::new(), 25, page);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page = PageRequest { page: 1, page_size: 10 };
        let result = PaginatedResult::new(Vec::<u8>::new(), 0, page);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn offset_of_third_page() {
        let page = PageRequest { page: 3, page_size: 20 };
        assert_eq!(page.offset(), 40);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        let page = PageRequest { page: i64::MAX as u64, page_size: 10 };
        assert_eq!(page.offset(), u64::MAX);
        let page = PageRequest { page: 0, page_size: 10 };
        assert_eq!(page.offset(), 0);
    }
}
