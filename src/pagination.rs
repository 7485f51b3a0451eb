//! Page links for the screens backed by a paged backend call.

use serde::Serialize;

/// Pages always linked at both ends of the bar.
const EDGE_PAGES: usize = 2;
/// Pages linked around the current one.
const AROUND_CURRENT: usize = 2;

/// Page numbers to link, `None` standing for an elided gap.
fn page_links(total_pages: usize, current: usize) -> Vec<Option<usize>> {
    let linked = |page: usize| {
        page <= EDGE_PAGES
            || page + EDGE_PAGES > total_pages
            || page.abs_diff(current) <= AROUND_CURRENT
    };

    let mut links = Vec::new();
    for page in 1..=total_pages {
        if linked(page) {
            links.push(Some(page));
        } else if links.last().is_some_and(Option::is_some) {
            links.push(None);
        }
    }
    links
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Wraps one page of `items` out of `total` records split in pages of `per_page`.
    pub fn new(items: Vec<T>, page: usize, total: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total_pages = total.div_ceil(per_page.max(1));

        Self {
            items,
            pages: page_links(total_pages, page),
            page,
            total,
        }
    }
}
