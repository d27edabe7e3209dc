//! Page arithmetic for the filtered list.

use crate::view::PAGE_SIZE;

/// `ceil(len / PAGE_SIZE)`; zero when there is nothing to show.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Clamp into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// The rows shown on `page` (1-based). Out-of-range pages are clamped.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let page = clamp_page(page, total_pages(items.len()));
    let start = ((page - 1) * PAGE_SIZE).min(items.len());
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// One entry of the numbered page strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Page { number: usize, current: bool },
    Gap,
}

/// Pagination summary handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(page: usize, total_items: usize) -> Self {
        let total_pages = total_pages(total_items);
        Self {
            page: clamp_page(page, total_pages),
            total_pages,
            total_items,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing 11-20 of 42", or "No results" for an empty list.
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "No results".to_string();
        }
        let first = (self.page - 1) * PAGE_SIZE + 1;
        let last = (self.page * PAGE_SIZE).min(self.total_items);
        format!("Showing {first}-{last} of {}", self.total_items)
    }

    /// Numbered links: the first and last page, a window of one around the
    /// current page, and gaps between them.
    pub fn pages(&self) -> Vec<PageLink> {
        let mut links = Vec::new();
        let mut last_shown = 0;
        for number in 1..=self.total_pages {
            let near_current = number + 1 >= self.page && number <= self.page + 1;
            if number == 1 || number == self.total_pages || near_current {
                if last_shown != 0 && number > last_shown + 1 {
                    links.push(PageLink::Gap);
                }
                links.push(PageLink::Page {
                    number,
                    current: number == self.page,
                });
                last_shown = number;
            }
        }
        links
    }
}
