//! Keymap configuration module
//!
//! Provides customizable keyboard shortcuts with preset keymaps (standard, vim, emacs).

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{parse_key_string, KeyBinding};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    /// Base preset keymap
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Get the action for a key event, checking overrides first then preset.
    /// If an action is overridden, preset bindings for that action are ignored.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// All effective bindings; overrides shadow preset bindings for the same action
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|preset| !self.overrides.iter().any(|o| o.action == preset.action)),
        );
        bindings
    }

    /// Display string for the first key bound to `action` (e.g. Action::Quit -> "Q")
    pub fn key_display(&self, action: Action) -> String {
        self.all_bindings()
            .into_iter()
            .find(|b| b.action == action)
            .map(|b| b.display())
            .unwrap_or_else(|| format!("{:?}", action))
    }

    /// Footer hints while the post list has focus
    pub fn footer_list(&self) -> String {
        format!(
            "Scroll: {}/{} | {}: {} | {}: {} | Form: {} | {}: {}",
            self.key_display(Action::MoveUp),
            self.key_display(Action::MoveDown),
            Action::Refresh.description(),
            self.key_display(Action::Refresh),
            Action::Create.description(),
            self.key_display(Action::Create),
            self.key_display(Action::NextField),
            Action::Quit.description(),
            self.key_display(Action::Quit),
        )
    }

    /// Footer hints while the form has focus
    pub fn footer_form(&self) -> String {
        format!(
            "Next field: {} | {}: {} | {}: {}",
            self.key_display(Action::NextField),
            Action::Confirm.description(),
            self.key_display(Action::Confirm),
            Action::Cancel.description(),
            self.key_display(Action::Cancel),
        )
    }

    /// Footer hints for the loading and error screens
    pub fn footer_quit_only(&self) -> String {
        format!("{}: {}", Action::Quit.description(), self.key_display(Action::Quit))
    }
}
