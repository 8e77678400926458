#![forbid(unsafe_code)]

//! Client of the upstream REST surface.
//!
//! Routes:
//!
//! - `GET {base}/api/users`
//! - `GET {base}/api/posts?userId=&page=&limit=`
//! - `DELETE {base}/api/posts/{id}`
//!
//! Non-2xx answers carry an `{"error": "..."}` body; when they do not, the
//! status line stands in. The posts route may answer with a paged envelope
//! or, on older deployments, a bare array; both decode.

use async_trait::async_trait;
use ffeed_core::{DEFAULT_PER_PAGE, DeleteReceipt, FeedQuery, Page, PostId, PostWithAuthor, User};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{PostStore, Result, StoreError};

/// HTTP client of the posts API.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    per_page: u32,
}

impl HttpStore {
    /// Client for the API rooted at `base_url` (scheme and host; a trailing
    /// slash is tolerated).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Use a preconfigured client (timeouts, proxies).
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Page size requested from the listing endpoint (clamped to >= 1).
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String> {
        response
            .text()
            .await
            .map_err(|error| StoreError::unavailable(error.to_string()))
    }
}

#[async_trait]
impl PostStore for HttpStore {
    async fn users(&self) -> Result<Vec<User>> {
        let url = format!("{}/api/users", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| StoreError::unavailable(error.to_string()))?;
        let status = response.status();
        tracing::debug!(message = "http.users", status = %status);
        if !status.is_success() {
            return Err(error_for_status(status, read_error_message(response).await));
        }
        let raw = self.read_body(response).await?;
        serde_json::from_str(&raw).map_err(|error| StoreError::malformed(error.to_string()))
    }

    async fn posts(&self, query: &FeedQuery) -> Result<Page<PostWithAuthor>> {
        let url = format!("{}/api/posts", self.base_url);
        let mut params: Vec<(&str, String)> = Vec::with_capacity(3);
        if let Some(author) = query.author() {
            params.push(("userId", author.to_string()));
        }
        params.push(("page", query.page().to_string()));
        params.push(("limit", self.per_page.to_string()));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|error| StoreError::unavailable(error.to_string()))?;
        let status = response.status();
        tracing::debug!(
            message = "http.posts",
            status = %status,
            author = ?query.author(),
            page = query.page(),
        );
        if !status.is_success() {
            return Err(error_for_status(status, read_error_message(response).await));
        }
        let raw = self.read_body(response).await?;
        parse_posts_body(&raw, self.per_page)
    }

    async fn delete_post(&self, id: PostId) -> Result<DeleteReceipt> {
        let url = format!("{}/api/posts/{id}", self.base_url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|error| StoreError::unavailable(error.to_string()))?;
        let status = response.status();
        tracing::debug!(message = "http.delete_post", id = %id, status = %status);
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id));
        }
        if !status.is_success() {
            return Err(error_for_status(status, read_error_message(response).await));
        }
        let raw = self.read_body(response).await?;
        let body: DeleteBody =
            serde_json::from_str(&raw).map_err(|error| StoreError::malformed(error.to_string()))?;
        let mut receipt = DeleteReceipt::new(id);
        if let Some(message) = body.message {
            receipt = receipt.with_message(message);
        }
        Ok(receipt)
    }
}

/// Either shape the posts route answers with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PostsBody {
    Paged(PostsEnvelope),
    Bare(Vec<PostWithAuthor>),
}

#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    posts: Vec<PostWithAuthor>,
    total: u64,
    page: u32,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    #[serde(default)]
    message: Option<String>,
}

fn parse_posts_body(raw: &str, fallback_per_page: u32) -> Result<Page<PostWithAuthor>> {
    let body: PostsBody =
        serde_json::from_str(raw).map_err(|error| StoreError::malformed(error.to_string()))?;
    match body {
        PostsBody::Paged(envelope) => Ok(Page::new(
            envelope.posts,
            envelope.page,
            envelope.limit,
            envelope.total,
        )),
        PostsBody::Bare(items) => {
            // Deployments that ignore paging return the full set; expose it
            // as a single page so the paging strip collapses.
            let total = items.len() as u64;
            let per_page = (items.len() as u32).max(fallback_per_page);
            Ok(Page::new(items, 1, per_page, total))
        }
    }
}

fn error_for_status(status: StatusCode, message: String) -> StoreError {
    if status == StatusCode::BAD_REQUEST {
        StoreError::invalid_request(message)
    } else {
        StoreError::unavailable(message)
    }
}

async fn read_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_JSON: &str = r#"{
        "id": 1,
        "title": "t",
        "body": "b",
        "authorId": 2,
        "author": { "id": 2, "name": "Ervin Howell" }
    }"#;

    #[test]
    fn parse_paged_envelope() {
        let raw = format!(r#"{{ "posts": [{POST_JSON}], "total": 42, "page": 3, "limit": 10 }}"#);
        let page = parse_posts_body(&raw, 10).unwrap();
        assert_eq!(page.page(), 3);
        assert_eq!(page.per_page(), 10);
        assert_eq!(page.total(), 42);
        assert_eq!(page.len(), 1);
        assert!(page.has_next());
    }

    #[test]
    fn parse_bare_array_collapses_to_one_page() {
        let raw = format!("[{POST_JSON}, {POST_JSON}]");
        let page = parse_posts_body(&raw, 10).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.total(), 2);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_posts_body("not json", 10).unwrap_err();
        assert!(matches!(err, StoreError::MalformedResponse { .. }));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            error_for_status(StatusCode::BAD_REQUEST, "Invalid post ID format".into()),
            StoreError::InvalidRequest { .. }
        ));
        assert!(matches!(
            error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            StoreError::Unavailable { .. }
        ));
    }

    #[test]
    fn delete_body_tolerates_missing_message() {
        let body: DeleteBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message, None);
        let body: DeleteBody =
            serde_json::from_str(r#"{"message":"Post 5 deleted successfully"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Post 5 deleted successfully"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let store = HttpStore::new("http://localhost:3000/");
        assert_eq!(store.base_url, "http://localhost:3000");
    }
}
