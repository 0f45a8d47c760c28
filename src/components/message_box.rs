use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Bordered panel for a single message
pub struct MessageBox;

impl MessageBox {
    /// Render a message box with a title and border color
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        message: &str,
        title: &str,
        style: Style,
    ) -> Result<()> {
        let t = theme();

        let message_block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(style)
            .padding(Padding::new(2, 2, 1, 1));

        let message_para = Paragraph::new(message)
            .style(t.text_style().patch(style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(message_block);

        frame.render_widget(message_para, area);

        Ok(())
    }

    /// Render an error panel
    pub fn render_error(frame: &mut Frame, area: Rect, message: &str) -> Result<()> {
        let t = theme();
        Self::render(frame, area, message, "Error", t.error_style())
    }
}
