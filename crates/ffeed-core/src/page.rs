#![forbid(unsafe_code)]

//! One page of results and the windowed page-number strip.
//!
//! The window keeps the first and last page visible with up to two pages of
//! context around the current one, eliding longer runs into gaps. The listing
//! UI hides the strip entirely when there is at most one page.
//!
//! # Invariants
//!
//! - A non-empty window starts with page 1 and ends with the last page.
//! - Window page numbers are strictly increasing; gaps never touch.
//! - `start_item..=end_item` stays within `1..=total` for in-range pages.

/// Page size used when the caller does not pick one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Pages of context on each side of the current page in the strip.
const WINDOW_DELTA: u32 = 2;

/// One page of store results plus the totals needed for paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number this slice came from.
    page: u32,
    /// Page size the slice was cut with.
    per_page: u32,
    /// Matching items across all pages.
    total: u64,
}

impl<T> Page<T> {
    /// Wrap a slice of results. `page` and `per_page` clamp to >= 1.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items,
            page: page.max(1),
            per_page: per_page.max(1),
            total,
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages needed for `total` items. Zero when there are none.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let per = u64::from(self.per_page);
        let pages = self.total.div_ceil(per);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based index of the first item on this page ("Showing X to ...").
    #[must_use]
    pub fn start_item(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page) + 1
    }

    /// 1-based index of the last item on this page ("... to Y of Z").
    #[must_use]
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.per_page)).min(self.total)
    }

    /// Windowed page strip for this page's position.
    #[must_use]
    pub fn window(&self) -> Vec<PageItem> {
        page_window(self.page, self.total_pages())
    }
}

/// An entry in the compact page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A directly selectable page number.
    Page(u32),
    /// An elided run of pages, rendered as an ellipsis.
    Gap,
}

/// Compact page window around `current`.
///
/// Empty when there is at most one page (the strip is hidden). `current`
/// positions outside `1..=total_pages` are tolerated and window as if the
/// nearest pages were elided.
#[must_use]
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let low = current.saturating_sub(WINDOW_DELTA).max(2);
    let high = current.saturating_add(WINDOW_DELTA).min(total_pages - 1);

    let mut items = Vec::with_capacity(2 * WINDOW_DELTA as usize + 5);
    items.push(PageItem::Page(1));
    if current > WINDOW_DELTA + 2 {
        items.push(PageItem::Gap);
    }
    for page in low..=high {
        items.push(PageItem::Page(page));
    }
    if current.saturating_add(WINDOW_DELTA + 1) < total_pages {
        items.push(PageItem::Gap);
    }
    items.push(PageItem::Page(total_pages));
    items
}
