//! Screen controllers for the application.
//!
//! A screen controller implements the `Screen` trait: it owns its state and
//! handles both rendering and events. The app performs whatever work the
//! returned `ScreenAction` asks for and feeds results back in.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      App                               │
//! │  event ──► screen.handle_event(event, ctx)             │
//! │                 │                                      │
//! │                 ▼                                      │
//! │           ScreenAction ──► spawn request on runtime    │
//! │                                  │                     │
//! │  screen.apply_fetch / apply_create ◄── poll handles    │
//! │                                                        │
//! │  ┌────────────────────────────────────────────────┐    │
//! │  │               Screen Trait                     │    │
//! │  │  - render(frame, area, context)                │    │
//! │  │  - handle_event(event, context) -> Action      │    │
//! │  │  - is_input_focused() -> bool                  │    │
//! │  │  - on_enter(context) -> Action                 │    │
//! │  └────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod post_list;
pub mod screen_trait;

pub use post_list::{DraftPost, Focus, PostListScreen, ReadyState, ScreenError, ScreenPhase};
pub use screen_trait::{FetchKind, RenderContext, Screen, ScreenAction, ScreenContext};
