#![forbid(unsafe_code)]

//! Feed view controller.
//!
//! Owns the feed query and loads the data behind the page: the author list
//! first, then the posts for the current query. An author-list failure is
//! tolerated so the filter can still render; a posts failure puts the view
//! into [`FeedPhase::Failed`] with the error text.
//!
//! Committed mutations elsewhere mark the controller stale through
//! [`FeedController::refresh_hook`]; hosts call
//! [`FeedController::reload_if_stale`] at the top of their frame.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ffeed_core::{FeedQuery, Page, PostWithAuthor, User, UserId};
use ffeed_store::PostStore;

use crate::pagination::PaginationControl;

/// Empty-state line for an unfiltered feed.
pub const NO_POSTS: &str = "No posts found.";

/// Empty-state line when an author filter is active.
pub const NO_POSTS_FOR_AUTHOR: &str = "No posts found for this author.";

/// Where the view is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    /// A load is in flight; hosts show skeletons.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed; hosts show the message.
    Failed { message: String },
}

/// Loads and exposes one feed view.
pub struct FeedController {
    store: Arc<dyn PostStore>,
    query: FeedQuery,
    phase: FeedPhase,
    users: Vec<User>,
    page: Option<Page<PostWithAuthor>>,
    stale: Arc<AtomicBool>,
}

impl FeedController {
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            query: FeedQuery::new(),
            phase: FeedPhase::Loading,
            users: Vec::new(),
            page: None,
            stale: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts the controller on a non-default query.
    #[must_use]
    pub fn with_query(mut self, query: FeedQuery) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    #[must_use]
    pub fn phase(&self) -> &FeedPhase {
        &self.phase
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn page(&self) -> Option<&Page<PostWithAuthor>> {
        self.page.as_ref()
    }

    /// The failure text, when the last load failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            FeedPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Hook for update coordinators: marks this view stale on every commit.
    #[must_use]
    pub fn refresh_hook(&self) -> impl Fn() + Send + Sync + 'static {
        let stale = Arc::clone(&self.stale);
        move || stale.store(true, Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Relaxed)
    }

    /// Loads the author list and the posts for the current query.
    pub async fn load(&mut self) {
        self.phase = FeedPhase::Loading;
        self.stale.store(false, Ordering::Relaxed);

        // The filter renders from whatever author list we can get.
        match self.store.users().await {
            Ok(users) => self.users = users,
            Err(error) => {
                tracing::warn!(message = "feed.users_failed", error = %error);
                self.users.clear();
            }
        }

        match self.store.posts(&self.query).await {
            Ok(page) => {
                tracing::debug!(
                    message = "feed.loaded",
                    page = page.page(),
                    returned = page.len(),
                    total = page.total(),
                );
                self.page = Some(page);
                self.phase = FeedPhase::Ready;
            }
            Err(error) => {
                tracing::error!(message = "feed.posts_failed", error = %error);
                self.phase = FeedPhase::Failed {
                    message: error.to_string(),
                };
            }
        }
    }

    /// Reloads when a commit has marked the view stale.
    pub async fn reload_if_stale(&mut self) -> bool {
        if !self.is_stale() {
            return false;
        }
        self.load().await;
        true
    }

    /// Applies an author selection and reloads from the first page.
    pub async fn select_author(&mut self, author: Option<UserId>) {
        self.query.select_author(author);
        self.load().await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.query.go_to_page(page);
        self.load().await;
    }

    /// Advances one page when the loaded page says there is one.
    pub async fn next_page(&mut self) {
        if self.page.as_ref().is_some_and(|page| page.has_next()) {
            self.query.next_page();
            self.load().await;
        }
    }

    /// Steps back one page when the loaded page says there is one.
    pub async fn previous_page(&mut self) {
        if self.page.as_ref().is_some_and(|page| page.has_previous()) {
            self.query.previous_page();
            self.load().await;
        }
    }

    /// The empty-state line, when a loaded page has nothing to show.
    #[must_use]
    pub fn empty_notice(&self) -> Option<&'static str> {
        match (&self.phase, &self.page) {
            (FeedPhase::Ready, Some(page)) if page.is_empty() => {
                Some(if self.query.author().is_some() {
                    NO_POSTS_FOR_AUTHOR
                } else {
                    NO_POSTS
                })
            }
            _ => None,
        }
    }

    /// Pager for the loaded page, when one is worth rendering.
    #[must_use]
    pub fn pagination(&self) -> Option<PaginationControl> {
        match (&self.phase, &self.page) {
            (FeedPhase::Ready, Some(page)) => PaginationControl::from_page(page),
            _ => None,
        }
    }
}

impl fmt::Debug for FeedController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedController")
            .field("query", &self.query)
            .field("phase", &self.phase)
            .field("users", &self.users.len())
            .field("loaded", &self.page.is_some())
            .field("stale", &self.is_stale())
            .finish_non_exhaustive()
    }
}
