use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: usize = 9;

/// One page of catalog results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(rename = "tours")]
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Slice `items` into 1-based pages. Pages past the end clamp to the last
/// page so a stale page number after narrowing a filter still shows results.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> PageResponse<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    PageResponse {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}
