//! Screen trait and associated types.
//!
//! A screen owns its state, renders itself, and turns input events into
//! `ScreenAction`s. Side effects (network requests, quitting) are performed
//! by the app, which later feeds results back into the screen.

use crate::config::Config;
use crate::models::NewPost;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Context provided for rendering screens.
pub struct RenderContext<'a> {
    /// Application configuration (keymap for footer hints).
    pub config: &'a Config,
    /// Frame counter driving spinner animation.
    pub tick: u64,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, tick: u64) -> Self {
        Self { config, tick }
    }
}

/// Context provided for handling events.
pub struct ScreenContext<'a> {
    /// Application configuration (keymap, request limits).
    pub config: &'a Config,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// Why a post list is being fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// The one-time load when the screen is first shown
    Initial,
    /// User-requested reload
    Refresh,
}

/// Actions that a screen can return after handling an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenAction {
    /// No action needed, stay on current screen.
    #[default]
    None,
    /// Fetch up to `limit` posts and report back with `kind`.
    FetchPosts { kind: FetchKind, limit: usize },
    /// Create a post from the submitted draft.
    CreatePost(NewPost),
    /// Request to quit the application.
    Quit,
}

/// Trait for screen controllers.
pub trait Screen {
    /// Render the screen into `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event and return what the app should do next.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Check if a text input is currently focused.
    ///
    /// When true, single-key shortcuts are typed into the field instead.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called when the screen is shown. May request work from the app.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }
}
