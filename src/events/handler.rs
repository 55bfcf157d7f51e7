//! Event handler for turning key presses into actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::Bindings;
use crate::state::{Action, BetPosition, InputMode, Store};

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    bindings: Bindings,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy)]
struct StoreSnapshot {
    input_mode: InputMode,
    show_help: bool,
    controls_enabled: bool,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            show_help: store.app.show_help,
            controls_enabled: store.dashboard.bet_form.controls_enabled(),
        });
    }

    /// Handle a key event and return an optional action.
    pub fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot?;

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, snapshot),
            InputMode::Amount(position) => self.handle_amount_mode(key, position, snapshot),
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: StoreSnapshot) -> Option<Action> {
        let bindings = &self.bindings;

        if bindings.quit.matches(&key) {
            return Some(Action::Quit);
        }

        if bindings.help.matches(&key) {
            return Some(Action::ToggleHelp);
        }

        if snapshot.show_help {
            // Any other key closes the help overlay.
            return bindings.back.matches(&key).then_some(Action::ToggleHelp);
        }

        if bindings.refresh.matches(&key) {
            return Some(Action::RefreshAll);
        }

        if bindings.bet_success.matches(&key) {
            return Some(Action::FocusBet(BetPosition::Success));
        }

        if bindings.bet_fail.matches(&key) {
            return Some(Action::FocusBet(BetPosition::Fail));
        }

        if bindings.back.matches(&key) {
            return Some(Action::DismissNotification);
        }

        None
    }

    fn handle_amount_mode(
        &self,
        key: KeyEvent,
        position: BetPosition,
        snapshot: StoreSnapshot,
    ) -> Option<Action> {
        if self.bindings.back.matches(&key) {
            return Some(Action::SetInputMode(InputMode::Normal));
        }

        if self.bindings.submit.matches(&key) {
            return snapshot
                .controls_enabled
                .then_some(Action::SubmitBet(position));
        }

        match key.code {
            KeyCode::Backspace => Some(Action::BetInputBackspace(position)),
            // Switch inputs without leaving input mode.
            KeyCode::Tab => Some(Action::FocusBet(match position {
                BetPosition::Success => BetPosition::Fail,
                BetPosition::Fail => BetPosition::Success,
            })),
            KeyCode::Char(c) => Some(Action::BetInputChar(position, c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, ManualClock, SurfaceRegistry};
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(
            Dashboard::new(SurfaceRegistry::full(), Box::new(ManualClock::new("02:05 PM"))),
            tx,
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn handler_for(store: &Store) -> EventHandler {
        let mut handler = EventHandler::new(Bindings::default());
        handler.update_store_snapshot(store);
        handler
    }

    #[test]
    fn test_no_snapshot_no_action() {
        let handler = EventHandler::new(Bindings::default());
        assert!(handler.handle_key(press(KeyCode::Char('q'))).is_none());
    }

    #[test]
    fn test_normal_mode_keys() {
        let store = store();
        let handler = handler_for(&store);

        assert!(matches!(handler.handle_key(press(KeyCode::Char('q'))), Some(Action::Quit)));
        assert!(matches!(handler.handle_key(press(KeyCode::Char('r'))), Some(Action::RefreshAll)));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('s'))),
            Some(Action::FocusBet(BetPosition::Success))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('f'))),
            Some(Action::FocusBet(BetPosition::Fail))
        ));
        // Digits mean nothing outside an input.
        assert!(handler.handle_key(press(KeyCode::Char('5'))).is_none());
    }

    #[test]
    fn test_amount_mode_typing_and_submit() {
        let mut store = store();
        store.reduce(Action::FocusBet(BetPosition::Fail));
        let handler = handler_for(&store);

        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('7'))),
            Some(Action::BetInputChar(BetPosition::Fail, '7'))
        ));
        // 'q' is text here, not quit.
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q'))),
            Some(Action::BetInputChar(BetPosition::Fail, 'q'))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter)),
            Some(Action::SubmitBet(BetPosition::Fail))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::SetInputMode(InputMode::Normal))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Tab)),
            Some(Action::FocusBet(BetPosition::Success))
        ));
    }

    #[test]
    fn test_submit_ignored_while_bet_in_flight() {
        let mut store = store();
        store.reduce(Action::FocusBet(BetPosition::Success));
        store.dashboard.bet_form.disable_controls();
        let handler = handler_for(&store);

        assert!(handler.handle_key(press(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut store = store();
        store.reduce(Action::ToggleHelp);
        let handler = handler_for(&store);

        assert!(handler.handle_key(press(KeyCode::Char('s'))).is_none());
        assert!(matches!(handler.handle_key(press(KeyCode::Esc)), Some(Action::ToggleHelp)));
        assert!(matches!(handler.handle_key(press(KeyCode::Char('?'))), Some(Action::ToggleHelp)));
    }
}
