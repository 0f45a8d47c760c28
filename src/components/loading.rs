use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Full-area blocking progress indicator
pub struct LoadingIndicator;

impl LoadingIndicator {
    /// Spinner glyph for the given animation tick
    pub fn frame_for(tick: u64) -> &'static str {
        SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
    }

    pub fn render(frame: &mut Frame, area: Rect, tick: u64) -> Result<()> {
        let t = theme();

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(area);

        let lines = vec![
            Line::styled(Self::frame_for(tick), t.title_style()),
            Line::styled("Loading...", t.text_style()),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);

        Ok(())
    }
}
