use crate::components::input_field::InputField;
use crate::screens::post_list::{DraftPost, Focus};
use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Rows the form occupies: border, two 3-row inputs, button row, border
pub const FORM_HEIGHT: u16 = 9;

/// New-post form: title field, body field, submit control
pub struct PostForm;

impl PostForm {
    /// Label of the submit control
    pub fn submit_label(submitting: bool) -> &'static str {
        if submitting {
            "Adding..."
        } else {
            "Add Post"
        }
    }

    /// Areas of the title field, body field and submit control within `area`
    pub fn areas(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(Block::default().borders(Borders::ALL).inner(area))
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        draft: &DraftPost,
        focus: Focus,
        can_submit: bool,
        submitting: bool,
    ) -> Result<()> {
        let t = theme();
        let form_focused = focus != Focus::List;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" New Post ")
            .title_style(t.title_style())
            .border_style(if form_focused {
                t.border_focused_style()
            } else {
                t.border_style()
            });
        frame.render_widget(block, area);

        let [title_area, body_area, button_area] = Self::areas(area);

        InputField::render(
            frame,
            title_area,
            &draft.title,
            focus == Focus::Title,
            "Title",
            "Post Title",
            submitting,
        )?;
        InputField::render(
            frame,
            body_area,
            &draft.body,
            focus == Focus::Body,
            "Body",
            "Post Body",
            submitting,
        )?;

        let button_style = if !can_submit || submitting {
            t.disabled_style()
        } else if focus == Focus::Submit {
            t.highlight_style()
        } else {
            t.title_style()
        };
        let button = Paragraph::new(format!("[ {} ]", Self::submit_label(submitting)))
            .style(button_style)
            .alignment(Alignment::Center);
        frame.render_widget(button, button_area);

        Ok(())
    }
}
