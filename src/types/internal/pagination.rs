use serde::{Deserialize, Serialize};

/// Rows per page when the caller does not ask for a size
pub const DEFAULT_PAGE_ROWS: u64 = 20;

/// Upper bound on rows per page
pub const MAX_PAGE_ROWS: u64 = 100;

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub page_number: u64,
    pub page_rows: u64,
}

impl Page {
    pub fn new(page_number: u64, page_rows: u64) -> Self {
        Self { page_number, page_rows }
    }

    /// Effective page size: defaulted when zero, capped at MAX_PAGE_ROWS
    pub fn limit(&self) -> u64 {
        match self.page_rows {
            0 => DEFAULT_PAGE_ROWS,
            rows => rows.min(MAX_PAGE_ROWS),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page_number.saturating_mul(self.limit())
    }
}

/// One page of results plus totals for the whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub page_number: u64,
    pub page_rows: u64,
    pub total_rows: u64,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl<T> PageResponse<T> {
    pub fn new(page: Page, total_rows: u64, data: Vec<T>) -> Self {
        let page_rows = page.limit();

        Self {
            page_number: page.page_number,
            page_rows,
            total_rows,
            total_pages: total_rows.div_ceil(page_rows),
            data,
        }
    }
}
