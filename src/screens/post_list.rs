//! Post list screen.
//!
//! Lists posts from the posts service, lets the user write a new post, and
//! refreshes on demand. The screen is always in exactly one phase:
//!
//! ```text
//!            initial fetch ok             refresh / create ok
//! Loading ─────────────────────► Ready ◄────────────────────┐
//!    │                             │ └───────────────────────┘
//!    │ initial fetch failed        │ refresh or create failed
//!    ▼                             ▼
//!  Error ◄─────────────────────────┘   (terminal: only Quit)
//! ```
//!
//! The screen never performs I/O. It returns `ScreenAction`s describing the
//! request to make, and the app reports results back through
//! [`PostListScreen::apply_fetch`] and [`PostListScreen::apply_create`].

use crate::components::{
    Footer, LoadingIndicator, MessageBox, PostForm, PostListView, FORM_HEIGHT,
};
use crate::keymap::Action;
use crate::models::{NewPost, Post};
use crate::screens::screen_trait::{
    FetchKind, RenderContext, Screen, ScreenAction, ScreenContext,
};
use crate::styles::theme;
use crate::utils::TextInput;
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use ratatui::widgets::Block;
use thiserror::Error;
use tracing::{debug, error, info};

/// Rows moved per mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// User-facing failures. Messages are fixed; the cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("Failed to fetch data")]
    FetchFailed,
    #[error("Failed to add new post")]
    SubmitFailed,
}

/// State of a screen showing the list and form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyState {
    /// Posts in display order (newest submission first, then service order)
    pub posts: Vec<Post>,
    /// A refresh request is in flight
    pub refreshing: bool,
    /// A create request is in flight
    pub submitting: bool,
}

/// Mutually exclusive screen phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenPhase {
    /// Waiting for the first fetch to resolve
    Loading,
    /// A request failed; only the message is shown
    Error(ScreenError),
    Ready(ReadyState),
}

/// Which part of the ready screen receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Title,
    Body,
    Submit,
    #[default]
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Title => Focus::Body,
            Focus::Body => Focus::Submit,
            Focus::Submit => Focus::List,
            Focus::List => Focus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Title => Focus::List,
            Focus::Body => Focus::Title,
            Focus::Submit => Focus::Body,
            Focus::List => Focus::Submit,
        }
    }

    fn is_text_field(self) -> bool {
        matches!(self, Focus::Title | Focus::Body)
    }
}

/// The not-yet-submitted post bound to the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPost {
    pub title: TextInput,
    pub body: TextInput,
}

impl DraftPost {
    /// Both fields have content
    pub fn is_complete(&self) -> bool {
        self.to_new_post().is_complete()
    }

    pub fn to_new_post(&self) -> NewPost {
        NewPost::new(self.title.text(), self.body.text())
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}

/// Hit-test areas from the last rendered ready frame
#[derive(Debug, Clone, Copy, Default)]
struct ReadyLayout {
    form: Rect,
    title: Rect,
    body: Rect,
    submit: Rect,
    list: Rect,
}

/// Screen controller for the post list
#[derive(Debug)]
pub struct PostListScreen {
    phase: ScreenPhase,
    draft: DraftPost,
    focus: Focus,
    /// Set once the initial fetch has been requested
    activated: bool,
    /// First visible content row of the list
    scroll: u16,
    layout: ReadyLayout,
}

impl Default for PostListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PostListScreen {
    pub fn new() -> Self {
        Self {
            phase: ScreenPhase::Loading,
            draft: DraftPost::default(),
            focus: Focus::default(),
            activated: false,
            scroll: 0,
            layout: ReadyLayout::default(),
        }
    }

    pub fn phase(&self) -> &ScreenPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ScreenPhase::Loading
    }

    pub fn error(&self) -> Option<ScreenError> {
        match self.phase {
            ScreenPhase::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Posts currently shown; empty unless ready
    pub fn posts(&self) -> &[Post] {
        match &self.phase {
            ScreenPhase::Ready(state) => &state.posts,
            _ => &[],
        }
    }

    fn ready(&self) -> Option<&ReadyState> {
        match &self.phase {
            ScreenPhase::Ready(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.ready().is_some_and(|s| s.refreshing)
    }

    pub fn is_submitting(&self) -> bool {
        self.ready().is_some_and(|s| s.submitting)
    }

    pub fn draft(&self) -> &DraftPost {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftPost {
        &mut self.draft
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Submit control is enabled: ready, both drafts non-empty, nothing in flight
    pub fn can_submit(&self) -> bool {
        self.ready().is_some_and(|s| !s.submitting) && self.draft.is_complete()
    }

    /// Request the initial fetch. Only the first call returns a request.
    pub fn activate(&mut self, initial_limit: usize) -> ScreenAction {
        if self.activated {
            return ScreenAction::None;
        }
        self.activated = true;
        debug!("Requesting initial posts (limit {})", initial_limit);
        ScreenAction::FetchPosts {
            kind: FetchKind::Initial,
            limit: initial_limit,
        }
    }

    /// Start a refresh. Ignored unless ready and no refresh is in flight.
    pub fn request_refresh(&mut self, limit: usize) -> ScreenAction {
        let ScreenPhase::Ready(state) = &mut self.phase else {
            return ScreenAction::None;
        };
        if state.refreshing {
            debug!("Refresh already in flight; ignoring");
            return ScreenAction::None;
        }
        state.refreshing = true;
        debug!("Requesting refresh (limit {})", limit);
        ScreenAction::FetchPosts {
            kind: FetchKind::Refresh,
            limit,
        }
    }

    /// Submit the draft. Ignored while the submit control is disabled.
    pub fn request_submit(&mut self) -> ScreenAction {
        if !self.can_submit() {
            return ScreenAction::None;
        }
        let new_post = self.draft.to_new_post();
        if let ScreenPhase::Ready(state) = &mut self.phase {
            state.submitting = true;
        }
        debug!("Submitting new post");
        ScreenAction::CreatePost(new_post)
    }

    /// Apply a finished fetch. Success replaces the whole list.
    pub fn apply_fetch(&mut self, kind: FetchKind, result: Result<Vec<Post>>) {
        if let ScreenPhase::Error(err) = self.phase {
            debug!("Discarding {:?} fetch result; screen is in error state ({})", kind, err);
            return;
        }

        match result {
            Ok(posts) => {
                info!("{:?} fetch returned {} posts", kind, posts.len());
                let submitting = self.is_submitting();
                self.phase = ScreenPhase::Ready(ReadyState {
                    posts,
                    refreshing: false,
                    submitting,
                });
                self.scroll = 0;
            }
            Err(e) => {
                error!("{:?} fetch failed: {:#}", kind, e);
                self.phase = ScreenPhase::Error(ScreenError::FetchFailed);
            }
        }
    }

    /// Apply a finished create. Success prepends the post and clears the draft;
    /// failure keeps the draft.
    pub fn apply_create(&mut self, result: Result<Post>) {
        let ScreenPhase::Ready(state) = &mut self.phase else {
            debug!("Discarding create result; screen is not ready");
            return;
        };

        match result {
            Ok(post) => {
                info!("Created post {}", post.id);
                state.posts.insert(0, post);
                state.submitting = false;
                self.draft.clear();
                self.scroll = 0;
            }
            Err(e) => {
                error!("Create post failed: {:#}", e);
                state.submitting = false;
                self.phase = ScreenPhase::Error(ScreenError::SubmitFailed);
            }
        }
    }

    fn max_scroll(&self) -> u16 {
        let visible = self.layout.list.height.saturating_sub(2) as usize;
        let width = self.layout.list.width.saturating_sub(2);
        PostListView::line_count(self.posts(), width).saturating_sub(visible) as u16
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll as i32 + delta).max(0) as u16;
        self.scroll = target.min(self.max_scroll());
    }

    fn page_size(&self) -> i32 {
        (self.layout.list.height.saturating_sub(2) as i32).max(1)
    }

    fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::Title => Some(&mut self.draft.title),
            Focus::Body => Some(&mut self.draft.body),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        let action = ctx.config.keymap.get_action(key.code, key.modifiers);

        if self.ready().is_none() {
            return if action == Some(Action::Quit) {
                ScreenAction::Quit
            } else {
                ScreenAction::None
            };
        }

        match self.focus {
            Focus::Title | Focus::Body => self.handle_text_key(key, action),
            Focus::Submit => self.handle_submit_key(action, ctx),
            Focus::List => self.handle_list_key(action, ctx),
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent, action: Option<Action>) -> ScreenAction {
        let editable = !self.is_submitting();
        let typed_char = matches!(key.code, KeyCode::Char(_))
            && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        if typed_char {
            if editable {
                if let Some(input) = self.focused_input_mut() {
                    input.handle_key(key.code);
                }
            }
            return ScreenAction::None;
        }

        if action == Some(Action::Quit) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ScreenAction::Quit;
        }

        match action.filter(Action::applies_in_text_field) {
            Some(Action::Cancel) => self.focus = Focus::List,
            Some(Action::NextField) => self.focus = self.focus.next(),
            Some(Action::PrevField) => self.focus = self.focus.prev(),
            Some(Action::Confirm) => {
                if self.focus == Focus::Title {
                    self.focus = Focus::Body;
                } else {
                    return self.request_submit();
                }
            }
            edit => {
                // Modified chars that matched nothing must not be inserted
                let raw_ok = !matches!(key.code, KeyCode::Char(_));
                if let Some(input) = self.focused_input_mut().filter(|_| editable) {
                    let handled = edit.is_some_and(|a| input.handle_action(a));
                    if !handled && raw_ok {
                        input.handle_key(key.code);
                    }
                }
            }
        }
        ScreenAction::None
    }

    fn handle_submit_key(&mut self, action: Option<Action>, ctx: &ScreenContext) -> ScreenAction {
        match action {
            Some(Action::Confirm) => return self.request_submit(),
            Some(Action::NextField) => self.focus = self.focus.next(),
            Some(Action::PrevField) => self.focus = self.focus.prev(),
            Some(Action::Cancel) => self.focus = Focus::List,
            Some(Action::Create) => self.focus = Focus::Title,
            Some(Action::Refresh) => return self.request_refresh(ctx.config.api.refresh_limit),
            Some(Action::Quit) => return ScreenAction::Quit,
            _ => {}
        }
        ScreenAction::None
    }

    fn handle_list_key(&mut self, action: Option<Action>, ctx: &ScreenContext) -> ScreenAction {
        match action {
            Some(Action::MoveUp) => self.scroll_by(-1),
            Some(Action::MoveDown) => self.scroll_by(1),
            Some(Action::PageUp) => self.scroll_by(-self.page_size()),
            Some(Action::PageDown) => self.scroll_by(self.page_size()),
            Some(Action::GoToTop) => self.scroll = 0,
            Some(Action::GoToEnd) => self.scroll = self.max_scroll(),
            Some(Action::Refresh) => return self.request_refresh(ctx.config.api.refresh_limit),
            Some(Action::Create | Action::NextField) => self.focus = Focus::Title,
            Some(Action::PrevField) => self.focus = Focus::Submit,
            Some(Action::Quit) => return ScreenAction::Quit,
            _ => {}
        }
        ScreenAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &ScreenContext) -> ScreenAction {
        if self.ready().is_none() {
            return ScreenAction::None;
        }

        let position = Position::new(mouse.column, mouse.row);
        let over_list = self.layout.list.contains(position);

        match mouse.kind {
            // Pull-to-refresh: wheel up over the list while already at the top
            MouseEventKind::ScrollUp if over_list && self.scroll == 0 => {
                self.request_refresh(ctx.config.api.refresh_limit)
            }
            MouseEventKind::ScrollUp if over_list => {
                self.scroll_by(-WHEEL_STEP);
                ScreenAction::None
            }
            MouseEventKind::ScrollDown if over_list => {
                self.scroll_by(WHEEL_STEP);
                ScreenAction::None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let layout = self.layout;
                if layout.title.contains(position) {
                    self.focus = Focus::Title;
                } else if layout.body.contains(position) {
                    self.focus = Focus::Body;
                } else if layout.submit.contains(position) {
                    self.focus = Focus::Submit;
                    return self.request_submit();
                } else if layout.list.contains(position) {
                    self.focus = Focus::List;
                }
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn render_ready(
        &self,
        frame: &mut Frame,
        state: &ReadyState,
        ctx: &RenderContext,
    ) -> Result<()> {
        PostForm::render(
            frame,
            self.layout.form,
            &self.draft,
            self.focus,
            self.can_submit(),
            state.submitting,
        )?;
        PostListView::render(
            frame,
            self.layout.list,
            &state.posts,
            self.scroll,
            state.refreshing,
            self.focus == Focus::List,
            ctx.tick,
        )
    }
}

impl Screen for PostListScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        frame.render_widget(Block::default().style(t.background_style()), area);

        let [body, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(area);

        let keymap = &ctx.config.keymap;
        match &self.phase {
            ScreenPhase::Loading => {
                LoadingIndicator::render(frame, body, ctx.tick)?;
                Footer::render(frame, footer_area, &keymap.footer_quit_only())?;
            }
            ScreenPhase::Error(err) => {
                let [_, panel, _] = Layout::vertical([
                    Constraint::Fill(1),
                    Constraint::Length(5),
                    Constraint::Fill(1),
                ])
                .areas(body);
                let panel = panel.inner(Margin::new(4, 0));
                MessageBox::render_error(frame, panel, &err.to_string())?;
                Footer::render(frame, footer_area, &keymap.footer_quit_only())?;
            }
            ScreenPhase::Ready(_) => {
                let [form_area, list_area] =
                    Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)])
                        .areas(body);
                let [title, body_field, submit] = PostForm::areas(form_area);
                self.layout = ReadyLayout {
                    form: form_area,
                    title,
                    body: body_field,
                    submit,
                    list: list_area,
                };
                // Viewport may have shrunk since the last frame
                self.scroll = self.scroll.min(self.max_scroll());

                if let ScreenPhase::Ready(state) = &self.phase {
                    self.render_ready(frame, state, ctx)?;
                }
                let hints = if self.focus == Focus::List {
                    keymap.footer_list()
                } else {
                    keymap.footer_form()
                };
                Footer::render(frame, footer_area, &hints)?;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let action = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, ctx),
            Event::Mouse(mouse) => self.handle_mouse(mouse, ctx),
            _ => ScreenAction::None,
        };
        Ok(action)
    }

    fn is_input_focused(&self) -> bool {
        self.ready().is_some() && self.focus.is_text_field()
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(self.activate(ctx.config.api.initial_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::components::post_list::{LIST_EMPTY, LIST_FOOTER, LIST_HEADER};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: format!("{} body", title),
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(screen: &mut PostListScreen, config: &Config, text: &str) {
        let ctx = ScreenContext::new(config);
        for c in text.chars() {
            screen.handle_event(key(KeyCode::Char(c)), &ctx).unwrap();
        }
    }

    fn wheel_up(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn ready_screen(posts: Vec<Post>) -> PostListScreen {
        let mut screen = PostListScreen::new();
        screen.activate(10);
        screen.apply_fetch(FetchKind::Initial, Ok(posts));
        screen
    }

    fn render_buffer(
        screen: &mut PostListScreen,
        config: &Config,
        width: u16,
        height: u16,
    ) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let ctx = RenderContext::new(config, 0);
        terminal
            .draw(|frame| {
                let area = frame.area();
                screen.render(frame, area, &ctx).unwrap();
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn render_to_string(screen: &mut PostListScreen, config: &Config) -> String {
        buffer_to_string(&render_buffer(screen, config, 80, 40))
    }

    fn buffer_to_string(buffer: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_starts_loading_and_requests_once() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = PostListScreen::new();
        assert!(screen.is_loading());

        let first = screen.on_enter(&ctx).unwrap();
        assert_eq!(
            first,
            ScreenAction::FetchPosts {
                kind: FetchKind::Initial,
                limit: 10
            }
        );
        assert_eq!(screen.on_enter(&ctx).unwrap(), ScreenAction::None);
    }

    #[test]
    fn test_initial_fetch_success_keeps_order() {
        let screen = ready_screen(vec![post(1, "a"), post(2, "b")]);
        let ids: Vec<i64> = screen.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!screen.is_refreshing());
        assert!(!screen.is_submitting());
    }

    #[test]
    fn test_initial_fetch_failure_shows_error() {
        let mut screen = PostListScreen::new();
        screen.apply_fetch(FetchKind::Initial, Err(anyhow::anyhow!("connection refused")));
        assert_eq!(screen.error(), Some(ScreenError::FetchFailed));
        assert_eq!(ScreenError::FetchFailed.to_string(), "Failed to fetch data");
    }

    #[test]
    fn test_refresh_replaces_list() {
        let mut screen = ready_screen(vec![post(1, "a")]);
        let action = screen.request_refresh(20);
        assert_eq!(
            action,
            ScreenAction::FetchPosts {
                kind: FetchKind::Refresh,
                limit: 20
            }
        );
        assert!(screen.is_refreshing());

        screen.apply_fetch(FetchKind::Refresh, Ok(vec![post(5, "x"), post(6, "y")]));
        let ids: Vec<i64> = screen.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 6]);
        assert!(!screen.is_refreshing());
    }

    #[test]
    fn test_overlapping_refresh_is_ignored() {
        let mut screen = ready_screen(vec![]);
        assert_ne!(screen.request_refresh(20), ScreenAction::None);
        assert_eq!(screen.request_refresh(20), ScreenAction::None);
    }

    #[test]
    fn test_refresh_ignored_while_loading() {
        let mut screen = PostListScreen::new();
        assert_eq!(screen.request_refresh(20), ScreenAction::None);
        assert!(screen.is_loading());
    }

    #[test]
    fn test_refresh_failure_shows_error() {
        let mut screen = ready_screen(vec![post(1, "a")]);
        screen.request_refresh(20);
        screen.apply_fetch(FetchKind::Refresh, Err(anyhow::anyhow!("500")));
        assert_eq!(screen.error(), Some(ScreenError::FetchFailed));
        assert!(screen.posts().is_empty());
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let config = Config::default();
        let mut screen = ready_screen(vec![]);
        screen.set_focus(Focus::Title);
        type_text(&mut screen, &config, "hello");
        assert!(!screen.can_submit());
        assert_eq!(screen.request_submit(), ScreenAction::None);

        screen.set_focus(Focus::Body);
        type_text(&mut screen, &config, "world");
        assert!(screen.can_submit());
    }

    #[test]
    fn test_whitespace_counts_as_content() {
        let mut screen = ready_screen(vec![]);
        screen.draft_mut().title = TextInput::with_text(" ");
        screen.draft_mut().body = TextInput::with_text(" ");
        assert!(screen.can_submit());
    }

    #[test]
    fn test_submit_success_prepends_and_clears_draft() {
        let mut screen = ready_screen(vec![post(1, "old")]);
        screen.draft_mut().title = TextInput::with_text("new");
        screen.draft_mut().body = TextInput::with_text("text");

        let action = screen.request_submit();
        assert_eq!(action, ScreenAction::CreatePost(NewPost::new("new", "text")));
        assert!(screen.is_submitting());
        assert!(!screen.can_submit());
        assert_eq!(screen.request_submit(), ScreenAction::None);

        screen.apply_create(Ok(Post {
            id: 101,
            title: "new".to_string(),
            body: "text".to_string(),
        }));
        let ids: Vec<i64> = screen.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![101, 1]);
        assert!(!screen.is_submitting());
        assert!(screen.draft().title.is_empty());
        assert!(screen.draft().body.is_empty());
    }

    #[test]
    fn test_submit_failure_keeps_draft() {
        let mut screen = ready_screen(vec![post(1, "old")]);
        screen.draft_mut().title = TextInput::with_text("new");
        screen.draft_mut().body = TextInput::with_text("text");
        screen.request_submit();

        screen.apply_create(Err(anyhow::anyhow!("timeout")));
        assert_eq!(screen.error(), Some(ScreenError::SubmitFailed));
        assert_eq!(screen.draft().title.text(), "new");
        assert_eq!(screen.draft().body.text(), "text");
    }

    #[test]
    fn test_refresh_during_submit_keeps_submitting() {
        let mut screen = ready_screen(vec![post(1, "old")]);
        screen.draft_mut().title = TextInput::with_text("t");
        screen.draft_mut().body = TextInput::with_text("b");
        screen.request_submit();
        screen.request_refresh(20);

        screen.apply_fetch(FetchKind::Refresh, Ok(vec![post(2, "fresh")]));
        assert!(screen.is_submitting());

        screen.apply_create(Ok(post(101, "t")));
        let ids: Vec<i64> = screen.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![101, 2]);
    }

    #[test]
    fn test_late_results_after_error_are_discarded() {
        let mut screen = ready_screen(vec![post(1, "a")]);
        screen.request_refresh(20);
        screen.apply_fetch(FetchKind::Refresh, Err(anyhow::anyhow!("down")));

        screen.apply_fetch(FetchKind::Refresh, Ok(vec![post(2, "b")]));
        screen.apply_create(Ok(post(101, "c")));
        assert_eq!(screen.error(), Some(ScreenError::FetchFailed));
    }

    #[test]
    fn test_quit_works_in_every_phase() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);

        let mut loading = PostListScreen::new();
        assert_eq!(loading.handle_event(key(KeyCode::Char('q')), &ctx).unwrap(), ScreenAction::Quit);

        let mut failed = PostListScreen::new();
        failed.apply_fetch(FetchKind::Initial, Err(anyhow::anyhow!("x")));
        assert_eq!(failed.handle_event(key(KeyCode::Char('q')), &ctx).unwrap(), ScreenAction::Quit);

        let mut ready = ready_screen(vec![]);
        assert_eq!(ready.handle_event(key(KeyCode::Char('q')), &ctx).unwrap(), ScreenAction::Quit);
    }

    #[test]
    fn test_shortcut_letters_are_typed_in_fields() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![]);
        screen.set_focus(Focus::Title);
        assert!(screen.is_input_focused());

        type_text(&mut screen, &config, "qrn");
        assert_eq!(screen.draft().title.text(), "qrn");
        assert!(!screen.is_refreshing());

        // Ctrl+C still quits from a field
        assert_eq!(screen.handle_event(ctrl('c'), &ctx).unwrap(), ScreenAction::Quit);
    }

    #[test]
    fn test_unbound_ctrl_chars_are_not_typed() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![]);
        screen.set_focus(Focus::Title);
        screen.handle_event(ctrl('z'), &ctx).unwrap();
        assert!(screen.draft().title.is_empty());
    }

    #[test]
    fn test_enter_moves_from_title_to_body_then_submits() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![]);
        screen.set_focus(Focus::Title);
        type_text(&mut screen, &config, "t");
        screen.handle_event(key(KeyCode::Enter), &ctx).unwrap();
        assert_eq!(screen.focus(), Focus::Body);

        type_text(&mut screen, &config, "b");
        let action = screen.handle_event(key(KeyCode::Enter), &ctx).unwrap();
        assert_eq!(action, ScreenAction::CreatePost(NewPost::new("t", "b")));
    }

    #[test]
    fn test_fields_are_read_only_while_submitting() {
        let config = Config::default();
        let mut screen = ready_screen(vec![]);
        screen.draft_mut().title = TextInput::with_text("t");
        screen.draft_mut().body = TextInput::with_text("b");
        screen.request_submit();

        screen.set_focus(Focus::Title);
        type_text(&mut screen, &config, "xyz");
        assert_eq!(screen.draft().title.text(), "t");
    }

    #[test]
    fn test_refresh_key_from_list() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![]);
        let action = screen.handle_event(key(KeyCode::Char('r')), &ctx).unwrap();
        assert_eq!(
            action,
            ScreenAction::FetchPosts {
                kind: FetchKind::Refresh,
                limit: 20
            }
        );
    }

    #[test]
    fn test_wheel_up_at_top_pulls_to_refresh() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![post(1, "a")]);
        render_to_string(&mut screen, &config);

        let action = screen.handle_event(wheel_up(5, 20), &ctx).unwrap();
        assert!(matches!(
            action,
            ScreenAction::FetchPosts {
                kind: FetchKind::Refresh,
                ..
            }
        ));
    }

    #[test]
    fn test_wheel_outside_list_is_ignored() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![post(1, "a")]);
        render_to_string(&mut screen, &config);

        // Row 2 is inside the form, row 39 is the footer
        for row in [2, 39] {
            let action = screen.handle_event(wheel_up(5, row), &ctx).unwrap();
            assert_eq!(action, ScreenAction::None);
        }
        assert!(!screen.is_refreshing());
    }

    #[test]
    fn test_wheel_before_first_frame_is_ignored() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![post(1, "a")]);
        let action = screen.handle_event(wheel_up(5, 20), &ctx).unwrap();
        assert_eq!(action, ScreenAction::None);
    }

    #[test]
    fn test_render_loading() {
        let config = Config::default();
        let mut screen = PostListScreen::new();
        let output = render_to_string(&mut screen, &config);
        assert!(output.contains("Loading..."));
        assert!(!output.contains(LIST_HEADER));
    }

    #[test]
    fn test_render_error_only_shows_message() {
        let config = Config::default();
        let mut screen = ready_screen(vec![post(1, "visible")]);
        screen.draft_mut().title = TextInput::with_text("t");
        screen.draft_mut().body = TextInput::with_text("b");
        screen.request_submit();
        screen.apply_create(Err(anyhow::anyhow!("boom")));

        let output = render_to_string(&mut screen, &config);
        assert!(output.contains("Failed to add new post"));
        assert!(!output.contains("visible"));
        assert!(!output.contains("Add Post"));
    }

    #[test]
    fn test_render_ready_empty() {
        let config = Config::default();
        let mut screen = ready_screen(vec![]);
        let output = render_to_string(&mut screen, &config);
        assert!(output.contains(LIST_HEADER));
        assert!(output.contains(LIST_EMPTY));
        assert!(output.contains(LIST_FOOTER));
        assert!(output.contains("Post Title"));
        assert!(output.contains("Post Body"));
        assert!(output.contains("Add Post"));
    }

    #[test]
    fn test_render_submitting_label() {
        let config = Config::default();
        let mut screen = ready_screen(vec![post(1, "first")]);
        screen.draft_mut().title = TextInput::with_text("t");
        screen.draft_mut().body = TextInput::with_text("b");
        screen.request_submit();

        let output = render_to_string(&mut screen, &config);
        assert!(output.contains("Adding..."));
        assert!(output.contains("first"));
        assert!(!output.contains(LIST_EMPTY));
    }

    #[test]
    fn test_click_on_title_field_focuses_it() {
        let config = Config::default();
        let ctx = ScreenContext::new(&config);
        let mut screen = ready_screen(vec![]);
        render_to_string(&mut screen, &config);

        // Title field starts one row inside the form border
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        screen.handle_event(click, &ctx).unwrap();
        assert_eq!(screen.focus(), Focus::Title);
    }

    /// Foreground colour of the first cell of `label` in `buffer`
    fn label_fg(buffer: &Buffer, label: &str) -> Option<Color> {
        let width = label.chars().count() as u16;
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width.saturating_sub(width - 1) {
                let text: String = (x..x + width).map(|cx| buffer[(cx, y)].symbol()).collect();
                if text == label {
                    return Some(buffer[(x, y)].fg);
                }
            }
        }
        None
    }

    #[test]
    fn test_empty_title_with_body_disables_submit() {
        let config = Config::default();
        let mut screen = ready_screen(vec![]);
        screen.set_focus(Focus::Body);
        type_text(&mut screen, &config, "B");

        assert!(screen.draft().title.is_empty());
        assert!(!screen.can_submit());
        assert_eq!(screen.request_submit(), ScreenAction::None);
        assert!(!screen.is_submitting());
    }

    #[test]
    fn test_render_initial_fetch_failure_hides_form_and_list() {
        let config = Config::default();
        let mut screen = PostListScreen::new();
        screen.activate(10);
        screen.apply_fetch(FetchKind::Initial, Err(anyhow::anyhow!("connection refused")));

        let output = render_to_string(&mut screen, &config);
        assert!(output.contains("Failed to fetch data"));
        assert!(!output.contains("Loading..."));
        assert!(!output.contains(LIST_HEADER));
        assert!(!output.contains(LIST_FOOTER));
        assert!(!output.contains("New Post"));
        assert!(!output.contains("Post Title"));
        assert!(!output.contains("Add Post"));
    }

    #[test]
    fn test_submit_control_uses_disabled_style_until_complete() {
        let config = Config::default();
        let disabled = theme().disabled_style().fg;
        let mut screen = ready_screen(vec![]);

        screen.set_focus(Focus::Body);
        type_text(&mut screen, &config, "B");
        let buffer = render_buffer(&mut screen, &config, 80, 40);
        assert_eq!(label_fg(&buffer, "[ Add Post ]"), disabled);

        screen.set_focus(Focus::Title);
        type_text(&mut screen, &config, "T");
        assert!(screen.can_submit());
        let buffer = render_buffer(&mut screen, &config, 80, 40);
        let enabled = label_fg(&buffer, "[ Add Post ]");
        assert!(enabled.is_some());
        assert_ne!(enabled, disabled);
    }

    #[test]
    fn test_long_title_wraps_on_narrow_screen() {
        let config = Config::default();
        let title = format!(
            "{} END",
            "qui est esse dolorem eum magni eos aperiam quia voluptate"
        );
        let mut screen = ready_screen(vec![post(1, &title)]);

        let output = buffer_to_string(&render_buffer(&mut screen, &config, 60, 40));
        assert!(output.contains("END"), "output:\n{}", output);
    }
}
