use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Key-hint footer
pub struct Footer;

impl Footer {
    /// Render `text` of the form "Label: keys | Label: keys"
    ///
    /// Returns the height used (1 for border, 1 for text).
    pub fn render(frame: &mut Frame, area: Rect, text: &str) -> Result<u16> {
        let t = theme();
        let mut spans = Vec::new();

        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }

            if let Some((label, keys)) = part.split_once(": ") {
                spans.push(Span::styled(format!("{}: ", label), t.title_style()));
                spans.push(Span::styled(keys.to_string(), t.emphasis_style()));
            } else {
                spans.push(Span::styled(part.to_string(), t.text_style()));
            }
        }

        let footer_block = Block::default()
            .borders(Borders::TOP)
            .border_style(t.border_focused_style())
            .border_type(BorderType::Rounded);

        let footer_inner = footer_block.inner(area);
        let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);

        frame.render_widget(footer_block, area);
        frame.render_widget(footer, footer_inner);

        Ok(2)
    }
}
