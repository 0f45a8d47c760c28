//! Semantic actions triggered by keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// All user actions the posts screen understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ List scrolling ============
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToEnd,

    // ============ Cursor movement in fields ============
    MoveLeft,
    MoveRight,
    /// Jump to start of input
    Home,
    /// Jump to end of input
    End,

    // ============ Form ============
    /// Submit the form / advance to the next field
    Confirm,
    /// Leave the form and return to the list
    Cancel,
    /// Jump to the title field to write a new post
    Create,
    NextField,
    PrevField,

    // ============ Text editing ============
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,

    // ============ Global ============
    /// Re-fetch the post list
    Refresh,
    Quit,
}

impl Action {
    /// Human-readable description, used in the footer
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Scroll up",
            Action::MoveDown => "Scroll down",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::MoveLeft => "Cursor left",
            Action::MoveRight => "Cursor right",
            Action::Home => "Start of input",
            Action::End => "End of input",
            Action::Confirm => "Submit",
            Action::Cancel => "Back to list",
            Action::Create => "New post",
            Action::NextField => "Next field",
            Action::PrevField => "Previous field",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
            Action::Refresh => "Refresh",
            Action::Quit => "Quit",
        }
    }

    /// Whether the action keeps its meaning while a text field has focus.
    ///
    /// Everything else (Quit, Refresh, Create, list scrolling) must not
    /// steal keystrokes from the field being typed into.
    pub fn applies_in_text_field(&self) -> bool {
        matches!(
            self,
            Action::Cancel
                | Action::Confirm
                | Action::NextField
                | Action::PrevField
                | Action::MoveLeft
                | Action::MoveRight
                | Action::Home
                | Action::End
                | Action::Backspace
                | Action::DeleteChar
        )
    }
}
