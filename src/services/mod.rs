//! Application services layer.
//!
//! Services wrap the network side of the app behind plain Rust APIs so the
//! screen never touches HTTP directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  UI Layer                   │
//! │  (App, PostListScreen, Components)          │
//! └──────────────────────┬──────────────────────┘
//!                        │ ScreenAction
//!                        ▼
//! ┌─────────────────────────────────────────────┐
//! │               Services Layer                │
//! │  RequestHandle ──► PostsService (trait)     │
//! │                    └─ HttpPostsService      │
//! └─────────────────────────────────────────────┘
//! ```

pub mod posts_service;
pub mod request;

pub use posts_service::{HttpPostsService, PostsService};
pub use request::RequestHandle;
