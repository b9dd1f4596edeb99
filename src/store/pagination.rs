//! Page arithmetic over a filtered collection

use serde::Serialize;

/// Position of the current page within the filtered collection.
///
/// `start_index` and `end_index` are 1-based and inclusive, the way the footer
/// reads ("Showing 11-20 of 23"). Both are 0 when the page is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub start_index: usize,
    pub end_index: usize,
    pub total_items: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl PaginationInfo {
    pub fn compute(total_items: usize, page_size: usize, current_page: usize) -> Self {
        let range = page_range(total_items, page_size, current_page);
        let (start_index, end_index) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        Self {
            start_index,
            end_index,
            total_items,
            current_page,
            total_pages: total_pages(total_items, page_size),
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// `max(1, ceil(len / page_size))`. A zero page size is treated as 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

/// Index range of a 1-based page. Out-of-range pages give an empty range.
pub fn page_range(len: usize, page_size: usize, page: usize) -> std::ops::Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}
