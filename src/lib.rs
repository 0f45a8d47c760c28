//! Postboard - a terminal screen for a JSON posts API
//!
//! Lists posts from a JSONPlaceholder-compatible endpoint, lets the user
//! write and submit a new post, and refreshes the list on demand.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod models;
pub mod screens;
pub mod services;
pub mod styles;
pub mod tui;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::{NewPost, Post};
pub use services::{HttpPostsService, PostsService};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
