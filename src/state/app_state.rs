//! Application-level state.

use chrono::NaiveDateTime;

use super::{BetPosition, Notification};

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the amount input of a position.
    Amount(BetPosition),
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current toast.
    pub notification: Option<Notification>,
    /// Whether the last market read succeeded.
    pub connected: bool,
    /// Server time of the last market read.
    pub last_update: Option<NaiveDateTime>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an amount input has focus.
    pub fn is_editing(&self) -> bool {
        matches!(self.input_mode, InputMode::Amount(_))
    }

    /// Position whose input has focus, if any.
    pub fn focused_position(&self) -> Option<BetPosition> {
        match self.input_mode {
            InputMode::Amount(position) => Some(position),
            InputMode::Normal => None,
        }
    }
}
