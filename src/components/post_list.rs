//! Scrollable list of posts with header, footer and empty-state labels.

use crate::components::loading::LoadingIndicator;
use crate::models::Post;
use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub const LIST_HEADER: &str = "Post List";
pub const LIST_FOOTER: &str = "End of list";
pub const LIST_EMPTY: &str = "No Posts Found";

/// Blank rows between consecutive posts
const POST_SPACING: usize = 1;

/// Renders the posts of a ready screen
pub struct PostListView;

impl PostListView {
    /// Build the list content: header, rows (or the empty label), footer.
    ///
    /// Each post is its title line followed by its body lines.
    pub fn lines(posts: &[Post]) -> Vec<Line<'static>> {
        let t = theme();
        let mut lines = vec![Line::styled(LIST_HEADER, t.title_style()).centered(), Line::default()];

        if posts.is_empty() {
            lines.push(Line::styled(LIST_EMPTY, t.muted_style()));
        }

        for (i, post) in posts.iter().enumerate() {
            if i > 0 {
                lines.extend(std::iter::repeat_with(Line::default).take(POST_SPACING));
            }
            lines.push(Line::styled(post.title.clone(), t.title_style()));
            lines.extend(
                post.body
                    .lines()
                    .map(|body_line| Line::styled(body_line.to_string(), t.muted_style())),
            );
        }

        lines.push(Line::default());
        lines.push(Line::styled(LIST_FOOTER, t.muted_style()).centered());
        lines
    }

    /// Unbordered, wrapping paragraph of the list content
    fn paragraph(posts: &[Post]) -> Paragraph<'static> {
        Paragraph::new(Self::lines(posts)).wrap(Wrap { trim: false })
    }

    /// Rows the content occupies once wrapped to `width` columns, used to
    /// clamp scrolling
    pub fn line_count(posts: &[Post], width: u16) -> usize {
        Self::paragraph(posts).line_count(width)
    }

    /// Render the list inside a bordered block.
    ///
    /// # Arguments
    /// * `scroll` - First content row shown
    /// * `refreshing` - Show the refresh indicator in the title
    /// * `focused` - Whether the list has keyboard focus
    /// * `tick` - Animation tick for the refresh spinner
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        posts: &[Post],
        scroll: u16,
        refreshing: bool,
        focused: bool,
        tick: u64,
    ) -> Result<()> {
        let t = theme();

        let title = if refreshing {
            format!(" Posts ({}) {} Refreshing... ", posts.len(), LoadingIndicator::frame_for(tick))
        } else {
            format!(" Posts ({}) ", posts.len())
        };

        let border_style = if focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(t.title_style())
            .border_style(border_style);

        let paragraph = Self::paragraph(posts).block(block).scroll((scroll, 0));
        frame.render_widget(paragraph, area);

        Ok(())
    }
}
