#![forbid(unsafe_code)]

//! Listing query: author filter plus 1-based paging.
//!
//! Mirrors the listing URL's query string (`userId`, `page`). Parsing is
//! lenient: unknown keys and non-numeric values are ignored rather than
//! rejected, so stale links still resolve to a sane view.
//!
//! # Invariants
//!
//! - The effective page is always >= 1.
//! - Changing the author filter resets paging to the first page.

use crate::entity::UserId;

const AUTHOR_KEY: &str = "userId";
const PAGE_KEY: &str = "page";

/// Filter and paging parameters for the posts listing.
///
/// The page is stored as an override so "first page" and "no page selected"
/// encode differently, matching how the listing URL drops the `page` key when
/// returning to the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeedQuery {
    author: Option<UserId>,
    page: Option<u32>,
}

impl FeedQuery {
    /// Unfiltered first page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            author: None,
            page: None,
        }
    }

    /// Restrict the listing to one author.
    #[must_use]
    pub const fn with_author(mut self, author: UserId) -> Self {
        self.author = Some(author);
        self
    }

    /// Select a page. Pages below 1 clamp to 1.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    /// Active author filter, if any.
    #[must_use]
    pub const fn author(&self) -> Option<UserId> {
        self.author
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Jump to a specific page. Pages below 1 clamp to 1.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = Some(page.max(1));
    }

    /// Advance one page.
    pub fn next_page(&mut self) {
        self.go_to_page(self.page().saturating_add(1));
    }

    /// Go back one page.
    pub fn previous_page(&mut self) {
        self.go_to_page(self.page().saturating_sub(1));
    }

    /// Drop the page selection, returning to the first page.
    pub fn reset_to_first_page(&mut self) {
        self.page = None;
    }

    /// Set or clear the author filter. Always returns to the first page so
    /// the paging window stays inside the new result set.
    pub fn select_author(&mut self, author: Option<UserId>) {
        tracing::debug!(message = "query.select_author", author = ?author);
        self.author = author;
        self.page = None;
    }

    /// Encode as a URL query string without the leading `?`. Empty when no
    /// parameter is set.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(author) = self.author {
            parts.push(format!("{AUTHOR_KEY}={author}"));
        }
        if let Some(page) = self.page {
            parts.push(format!("{PAGE_KEY}={page}"));
        }
        parts.join("&")
    }

    /// Parse a query string, with or without the leading `?`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::new();
        for pair in raw.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                AUTHOR_KEY => {
                    if let Ok(id) = value.parse::<i64>() {
                        query.author = Some(UserId(id));
                    }
                }
                PAGE_KEY => {
                    if let Ok(page) = value.parse::<u32>() {
                        query.page = Some(page.max(1));
                    }
                }
                _ => {}
            }
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_is_default() {
        assert_eq!(FeedQuery::parse(""), FeedQuery::new());
        assert_eq!(FeedQuery::parse("?"), FeedQuery::new());
    }

    #[test]
    fn parse_reads_author_and_page() {
        let query = FeedQuery::parse("?userId=3&page=2");
        assert_eq!(query.author(), Some(UserId(3)));
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn parse_ignores_junk_values() {
        let query = FeedQuery::parse("userId=abc&page=xyz&color=red");
        assert_eq!(query.author(), None);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn parse_clamps_page_zero_to_first() {
        assert_eq!(FeedQuery::parse("page=0").page(), 1);
    }

    #[test]
    fn query_string_roundtrip() {
        let query = FeedQuery::new().with_author(UserId(5)).with_page(4);
        assert_eq!(query.to_query_string(), "userId=5&page=4");
        assert_eq!(FeedQuery::parse(&query.to_query_string()), query);
    }

    #[test]
    fn first_page_omits_the_page_key() {
        let mut query = FeedQuery::new().with_page(3);
        query.reset_to_first_page();
        assert_eq!(query.to_query_string(), "");
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn select_author_resets_paging() {
        let mut query = FeedQuery::new().with_page(7);
        query.select_author(Some(UserId(2)));
        assert_eq!(query.author(), Some(UserId(2)));
        assert_eq!(query.page(), 1);
        assert_eq!(query.to_query_string(), "userId=2");

        query.go_to_page(4);
        query.select_author(None);
        assert_eq!(query, FeedQuery::new());
    }

    #[test]
    fn previous_page_saturates_at_first() {
        let mut query = FeedQuery::new();
        query.previous_page();
        assert_eq!(query.page(), 1);
    }
}
