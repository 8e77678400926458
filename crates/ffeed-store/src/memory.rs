#![forbid(unsafe_code)]

//! In-process store backed by seeded fixtures.
//!
//! Behaves like the real surface: newest posts first, author join, paging,
//! and not-found deletes. Fault injection lets tests and the demo walk the
//! failure paths without a wire.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use ffeed_core::{DEFAULT_PER_PAGE, DeleteReceipt, FeedQuery, Page, Post, PostId, PostWithAuthor, User};

use crate::{PostStore, Result, StoreError};

/// Shared, clonable in-memory store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug)]
struct MemoryInner {
    users: Vec<User>,
    posts: Vec<Post>,
    per_page: u32,
    unavailable: bool,
    next_users_failure: Option<StoreError>,
    next_delete_failure: Option<StoreError>,
}

impl MemoryStore {
    /// Empty store with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                users: Vec::new(),
                posts: Vec::new(),
                per_page: DEFAULT_PER_PAGE,
                unavailable: false,
                next_users_failure: None,
                next_delete_failure: None,
            })),
        }
    }

    /// Store pre-populated with a small author/post fixture set.
    #[must_use]
    pub fn with_seed_data() -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            inner.users = seed_users();
            inner.posts = seed_posts();
        }
        store
    }

    /// Override the page size used by [`PostStore::posts`].
    #[must_use]
    pub fn with_per_page(self, per_page: u32) -> Self {
        self.lock().per_page = per_page.max(1);
        self
    }

    pub fn insert_user(&self, user: User) {
        self.lock().users.push(user);
    }

    pub fn insert_post(&self, post: Post) {
        self.lock().posts.push(post);
    }

    /// Queue a failure for the next users call only.
    pub fn fail_next_users(&self, error: StoreError) {
        self.lock().next_users_failure = Some(error);
    }

    /// Queue a failure for the next delete call only.
    pub fn fail_next_delete(&self, error: StoreError) {
        self.lock().next_delete_failure = Some(error);
    }

    /// Make every operation fail with [`StoreError::Unavailable`] until
    /// cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    #[must_use]
    pub fn post_count(&self) -> usize {
        self.lock().posts.len()
    }

    #[must_use]
    pub fn contains_post(&self, id: PostId) -> bool {
        self.lock().posts.iter().any(|post| post.id == id)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryInner {
    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            Err(StoreError::unavailable("store offline"))
        } else {
            Ok(())
        }
    }

    fn author_of(&self, post: &Post) -> User {
        self.users
            .iter()
            .find(|user| user.id == post.author_id)
            .cloned()
            // A post whose user record is gone still lists, just unnamed.
            .unwrap_or(User {
                id: post.author_id,
                name: None,
            })
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn users(&self) -> Result<Vec<User>> {
        let mut inner = self.lock();
        inner.check_available()?;
        if let Some(error) = inner.next_users_failure.take() {
            return Err(error);
        }
        Ok(inner.users.clone())
    }

    async fn posts(&self, query: &FeedQuery) -> Result<Page<PostWithAuthor>> {
        let inner = self.lock();
        inner.check_available()?;

        let mut matching: Vec<&Post> = inner
            .posts
            .iter()
            .filter(|post| query.author().is_none_or(|author| post.author_id == author))
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));

        let total = matching.len() as u64;
        let page_no = query.page();
        let per_page = inner.per_page;
        let start = (page_no as usize - 1).saturating_mul(per_page as usize);
        let items: Vec<PostWithAuthor> = matching
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .map(|post| PostWithAuthor::new(post.clone(), inner.author_of(post)))
            .collect();

        tracing::debug!(
            message = "memory.posts",
            author = ?query.author(),
            page = page_no,
            returned = items.len(),
            total,
        );
        Ok(Page::new(items, page_no, per_page, total))
    }

    async fn delete_post(&self, id: PostId) -> Result<DeleteReceipt> {
        let mut inner = self.lock();
        inner.check_available()?;
        if let Some(error) = inner.next_delete_failure.take() {
            tracing::debug!(message = "memory.delete_post.injected_failure", id = %id);
            return Err(error);
        }

        let position = inner.posts.iter().position(|post| post.id == id);
        match position {
            Some(index) => {
                inner.posts.remove(index);
                tracing::debug!(message = "memory.delete_post", id = %id);
                Ok(DeleteReceipt::new(id)
                    .with_message(format!("Post {id} deleted successfully")))
            }
            None => Err(StoreError::NotFound(id)),
        }
    }
}

fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "Leanne Graham"),
        User::new(2, "Ervin Howell"),
        User::new(3, "Clementine Bauch"),
        User::unnamed(4),
    ]
}

fn seed_posts() -> Vec<Post> {
    vec![
        Post::new(1, "sunt aut facere", "quia et suscipit recusandae", 1),
        Post::new(2, "qui est esse", "est rerum tempore vitae", 1),
        Post::new(3, "ea molestias quasi", "et iusto sed quo iure", 1),
        Post::new(4, "eum et est occaecati", "ullam et saepe reiciendis", 2),
        Post::new(5, "nesciunt quas odio", "repudiandae veniam quaerat", 2),
        Post::new(6, "dolorem eum magni", "ut aspernatur corporis harum", 2),
        Post::new(7, "magnam facilis autem", "dolore placeat quibusdam ea", 3),
        Post::new(8, "dolorem dolore est ipsam", "dignissimos aperiam dolorem", 3),
        Post::new(9, "nesciunt iure omnis", "consectetur animi nesciunt", 3),
        Post::new(10, "optio molestias id", "quia id aut similique", 4),
        Post::new(11, "et ea vero quia", "fugiat blanditiis voluptate", 4),
        Post::new(12, "in quibusdam tempore", "voluptatem eligendi optio", 4),
    ]
}
