use crate::styles::theme;
use crate::utils::TextInput;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Bordered single-line text field
pub struct InputField;

impl InputField {
    /// Render an input field and place the terminal cursor when focused
    ///
    /// # Arguments
    /// * `frame` - The frame to render to
    /// * `area` - The area to render the input in (3 rows: border, text, border)
    /// * `input` - The field's text and cursor
    /// * `focused` - Whether the input is focused
    /// * `title` - The label shown in the top border
    /// * `placeholder` - Text shown while the input is empty
    /// * `disabled` - Whether the input is read-only right now
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        input: &TextInput,
        focused: bool,
        title: &str,
        placeholder: &str,
        disabled: bool,
    ) -> Result<()> {
        let t = theme();

        let border_style = if disabled {
            t.disabled_style()
        } else if focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };

        let (display_text, text_style) = if input.is_empty() {
            (placeholder, t.muted_style())
        } else if disabled {
            (input.text(), t.disabled_style())
        } else {
            (input.text(), t.text_style())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);
        let inner = block.inner(area);

        // Keep the cursor visible on long input by scrolling horizontally
        let width = inner.width as usize;
        let offset = if focused && width > 0 {
            input.cursor().saturating_sub(width.saturating_sub(1))
        } else {
            0
        };

        let paragraph = Paragraph::new(display_text)
            .style(text_style)
            .scroll((0, offset as u16))
            .block(block);
        frame.render_widget(paragraph, area);

        if focused && !disabled {
            let x = inner.x + (input.cursor() - offset).min(width) as u16;
            frame.set_cursor_position((x, inner.y));
        }

        Ok(())
    }
}
