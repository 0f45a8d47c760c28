//! Posts API client.
//!
//! `PostsService` is the seam the screen's requests go through; the HTTP
//! implementation talks to a JSONPlaceholder-compatible endpoint:
//!
//! - `GET  <base>/posts?_limit=<n>` returns a JSON array of posts
//! - `POST <base>/posts` with a JSON `{title, body}` returns the created post

use crate::config::ApiConfig;
use crate::models::{NewPost, Post};
use anyhow::{Context, Result};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

/// List and create operations against a posts backend.
pub trait PostsService: Send + Sync + 'static {
    /// Fetch at most `limit` posts, in service order.
    fn list_posts(&self, limit: usize) -> impl Future<Output = Result<Vec<Post>>> + Send;

    /// Create a post and return the service's representation of it.
    fn create_post(&self, post: NewPost) -> impl Future<Output = Result<Post>> + Send;
}

/// reqwest-backed posts client
#[derive(Debug, Clone)]
pub struct HttpPostsService {
    http_client: Client,
    base_url: String,
}

impl HttpPostsService {
    /// Build a client for the configured base URL and timeout
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!("postboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn list_url(&self, limit: usize) -> String {
        format!("{}?_limit={}", self.posts_url(), limit)
    }
}

impl PostsService for HttpPostsService {
    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let url = self.list_url(limit);
        info!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to fetch posts")?;

        let status = response.status();
        info!("GET {} -> {}", url, status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Posts API error response: {}", error_text);
            anyhow::bail!("Posts API error ({}): {}", status, error_text);
        }

        let posts: Vec<Post> = response
            .json()
            .await
            .context("Failed to parse posts response")?;
        debug!("Decoded {} posts", posts.len());

        Ok(posts)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let url = self.posts_url();
        info!("POST {} (title: {} chars, body: {} chars)", url, post.title.len(), post.body.len());

        // .json() sets Content-Type: application/json
        let response = self
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .json(&post)
            .send()
            .await
            .context("Failed to create post")?;

        let status = response.status();
        info!("POST {} -> {}", url, status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Create post error response: {}", error_text);
            anyhow::bail!("Failed to create post ({}): {}", status, error_text);
        }

        let created: Post = response
            .json()
            .await
            .context("Failed to parse created post")?;
        debug!("Created post id {}", created.id);

        Ok(created)
    }
}
