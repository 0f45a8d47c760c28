use crate::config::Config;
use crate::models::Post;
use crate::screens::{
    FetchKind, PostListScreen, RenderContext, Screen, ScreenAction, ScreenContext,
};
use crate::services::{PostsService, RequestHandle};
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use ratatui::Frame;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// How long the event loop waits for input before redrawing
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Main application state
pub struct App<S: PostsService> {
    config: Config,
    runtime: Runtime,
    service: Arc<S>,
    screen: PostListScreen,
    /// Fetches in flight, tagged with why they were issued
    pending_fetches: Vec<(FetchKind, RequestHandle<Vec<Post>>)>,
    pending_creates: Vec<RequestHandle<Post>>,
    should_quit: bool,
    /// Frame counter for spinner animation
    tick: u64,
}

impl<S: PostsService> App<S> {
    pub fn new(config: Config, service: Arc<S>) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;

        Ok(Self {
            config,
            runtime,
            service,
            screen: PostListScreen::new(),
            pending_fetches: Vec::new(),
            pending_creates: Vec::new(),
            should_quit: false,
            tick: 0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let result = self.event_loop(&mut tui);

        tui.exit()?;
        result
    }

    fn event_loop(&mut self, tui: &mut Tui) -> Result<()> {
        self.start()?;

        loop {
            let mut render_result = Ok(());
            tui.terminal_mut()
                .draw(|frame| render_result = self.render(frame))
                .context("Failed to draw frame")?;
            render_result?;

            if self.should_quit {
                info!("Quitting");
                break;
            }

            self.poll_requests();

            if let Some(event) = tui.poll_event(FRAME_INTERVAL)? {
                self.handle_event(event)?;
            }
            self.tick = self.tick.wrapping_add(1);
        }

        Ok(())
    }

    /// Show the screen and issue whatever it requests on entry
    pub fn start(&mut self) -> Result<()> {
        let ctx = ScreenContext::new(&self.config);
        let action = self.screen.on_enter(&ctx)?;
        self.dispatch(action);
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        let ctx = ScreenContext::new(&self.config);
        let action = self.screen.handle_event(event, &ctx)?;
        self.dispatch(action);
        Ok(())
    }

    fn dispatch(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::FetchPosts { kind, limit } => {
                debug!("Spawning {:?} fetch", kind);
                let service = Arc::clone(&self.service);
                let handle =
                    RequestHandle::spawn(&self.runtime, async move { service.list_posts(limit).await });
                self.pending_fetches.push((kind, handle));
            }
            ScreenAction::CreatePost(new_post) => {
                debug!("Spawning create request");
                let service = Arc::clone(&self.service);
                let handle = RequestHandle::spawn(&self.runtime, async move {
                    service.create_post(new_post).await
                });
                self.pending_creates.push(handle);
            }
        }
    }

    /// Apply every request that finished since the last poll
    pub fn poll_requests(&mut self) {
        let screen = &mut self.screen;

        self.pending_fetches
            .retain_mut(|(kind, handle)| match handle.try_recv() {
                Some(result) => {
                    screen.apply_fetch(*kind, result);
                    false
                }
                None => true,
            });

        self.pending_creates.retain_mut(|handle| match handle.try_recv() {
            Some(result) => {
                screen.apply_create(result);
                false
            }
            None => true,
        });
    }

    /// Block until every in-flight request has resolved and been applied.
    ///
    /// Fetches are applied before creates.
    pub fn wait_for_requests(&mut self) {
        for (kind, handle) in std::mem::take(&mut self.pending_fetches) {
            let result = handle.wait(&self.runtime);
            self.screen.apply_fetch(kind, result);
        }
        for handle in std::mem::take(&mut self.pending_creates) {
            let result = handle.wait(&self.runtime);
            self.screen.apply_create(result);
        }
    }

    /// Number of requests still in flight
    pub fn pending_requests(&self) -> usize {
        self.pending_fetches.len() + self.pending_creates.len()
    }

    pub fn render(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        let ctx = RenderContext::new(&self.config, self.tick);
        self.screen.render(frame, area, &ctx)
    }

    pub fn screen(&self) -> &PostListScreen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut PostListScreen {
        &mut self.screen
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
