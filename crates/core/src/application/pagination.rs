// Pagination - offset/limit page math shared by list operations

use serde::{Deserialize, Serialize};

/// Page metadata returned next to a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub items_per_page: u32,
    pub total_items: u32,
}

impl PaginationInfo {
    /// Page metadata for `total_items` items split into pages of `page_size`
    pub fn new(current_page: u32, page_size: u32, total_items: usize) -> Self {
        Self {
            current_page,
            total_pages: total_pages(total_items, page_size),
            items_per_page: page_size,
            total_items: saturate_u32(total_items),
        }
    }

    /// Zero-page metadata for a list that has nothing to show
    pub fn empty(current_page: u32, page_size: u32) -> Self {
        Self::new(current_page, page_size, 0)
    }
}

/// ceil(total_items / page_size), 0 when there are no items
pub fn total_pages(total_items: usize, page_size: u32) -> u32 {
    if total_items == 0 || page_size == 0 {
        return 0;
    }
    saturate_u32(total_items.div_ceil(page_size as usize))
}

/// Slice one page out of `items`
///
/// Pages are 1-based. Out-of-range pages return an empty slice; offset
/// arithmetic saturates instead of overflowing.
pub fn paginate<T>(items: &[T], page: u32, page_size: u32) -> (&[T], u32) {
    let pages = total_pages(items.len(), page_size);
    if page == 0 || page_size == 0 {
        return (&[], pages);
    }

    let offset = (page as usize - 1).saturating_mul(page_size as usize);
    if offset >= items.len() {
        return (&[], pages);
    }
    let end = offset.saturating_add(page_size as usize).min(items.len());
    (&items[offset..end], pages)
}

fn saturate_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
