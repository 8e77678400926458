#![forbid(unsafe_code)]

//! Pagination control derived from one loaded page.
//!
//! The control only exists when there is more than one page; hosts render
//! nothing otherwise. It carries the compressed page window plus the
//! "Showing X to Y of Z results" summary.

use ffeed_core::{Page, PageItem};

/// Snapshot of the pager for the page currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControl {
    current: u32,
    total_pages: u32,
    window: Vec<PageItem>,
    has_previous: bool,
    has_next: bool,
    start_item: u64,
    end_item: u64,
    total: u64,
}

impl PaginationControl {
    /// Builds the control, or `None` when everything fits on one page.
    #[must_use]
    pub fn from_page<T>(page: &Page<T>) -> Option<Self> {
        if page.total_pages() <= 1 {
            return None;
        }
        Some(Self {
            current: page.page(),
            total_pages: page.total_pages(),
            window: page.window(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            start_item: page.start_item(),
            end_item: page.end_item(),
            total: page.total(),
        })
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page buttons to render, gaps included.
    #[must_use]
    pub fn window(&self) -> &[PageItem] {
        &self.window
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// The result-range line shown beside the buttons.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.start_item, self.end_item, self.total
        )
    }
}
