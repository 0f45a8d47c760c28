//! Shared test utilities for posts workflow integration tests.
//!
//! - `FakePostsService`: in-memory `PostsService` with scripted responses
//!   and a log of the calls it received
//! - `CannedServer`: an axum router on a local port that answers `/posts`
//!   with the same status and body, and records what it got

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use postboard::models::{NewPost, Post};
use postboard::services::PostsService;

/// Build a post with a predictable body
pub fn post(id: i64, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        body: format!("body of {}", title),
    }
}

/// `n` posts with ids starting at `first_id`
pub fn posts(first_id: i64, n: usize) -> Vec<Post> {
    (0..n as i64)
        .map(|i| post(first_id + i, &format!("post {}", first_id + i)))
        .collect()
}

/// A call received by `FakePostsService`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(usize),
    Create(NewPost),
}

/// In-memory posts service. Each call pops the next scripted response;
/// an unscripted call fails.
#[derive(Default)]
pub struct FakePostsService {
    list_responses: Mutex<VecDeque<Result<Vec<Post>, String>>>,
    create_responses: Mutex<VecDeque<Result<Post, String>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakePostsService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_list_ok(&self, posts: Vec<Post>) {
        self.list_responses.lock().unwrap().push_back(Ok(posts));
    }

    pub fn push_list_err(&self, message: &str) {
        self.list_responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn push_create_ok(&self, post: Post) {
        self.create_responses.lock().unwrap().push_back(Ok(post));
    }

    pub fn push_create_err(&self, message: &str) {
        self.create_responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(limit) => Some(limit),
                Call::Create(_) => None,
            })
            .collect()
    }
}

impl PostsService for FakePostsService {
    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>> {
        self.calls.lock().unwrap().push(Call::List(limit));
        let next = self.list_responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(posts)) => Ok(posts),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted list response")),
        }
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        self.calls.lock().unwrap().push(Call::Create(post));
        let next = self.create_responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(post)) => Ok(post),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted create response")),
        }
    }
}

/// A request as seen by `CannedServer`
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Path plus query string, e.g. `/posts?_limit=10`
    pub target: String,
    /// Header names are lowercased
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Shared state of the canned router
#[derive(Clone)]
struct CannedState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Local HTTP server answering `/posts` with one canned response
pub struct CannedServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl CannedServer {
    /// Start serving on an ephemeral port. Must be called inside a tokio runtime.
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = CannedState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            requests: Arc::clone(&requests),
        };
        let app = Router::new()
            .route("/posts", get(capture).post(capture))
            .with_state(state);

        tokio::spawn(async move { axum::serve(listener, app).await });

        Self {
            base_url: format!("http://{}", address),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Record the request, then answer with the canned status and JSON body
async fn capture(
    State(state): State<CannedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_lowercase(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    state.requests.lock().unwrap().push(CapturedRequest {
        method: method.to_string(),
        target: uri.to_string(),
        headers,
        body,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}
