use serde::Serialize;

/// Builds the 1-based page links shown under a list, `None` marking a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Number of pages needed to show `total` items, `page_size` at a time.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Pagination controls derived from a result total.
///
/// `page` is the 1-based page currently shown; `pages` are the links to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl PageControls {
    pub fn new(total: usize, page_index: usize, page_size: usize) -> Self {
        let total_pages = total_pages(total, page_size);
        let page = page_index + 1;

        let pages = get_pages(total_pages, page, 2, 2, 4, 2);

        Self {
            pages,
            page,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
