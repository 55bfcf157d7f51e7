//! State management for Racebook.
//!
//! Unidirectional data flow: input handlers and background tasks send
//! [`Action`]s over a channel, and the [`Store`] applies them one at a time
//! on the event loop.

mod app_state;
mod market_state;
mod portfolio_state;

pub use app_state::{AppState, InputMode};
pub use market_state::{MarketSnapshot, MarketUpdate, RaceStatus};
pub use portfolio_state::{
    BetPosition, BetReceipt, BetRequest, PlacedBet, PortfolioState, UserPositions,
};

use crate::betting::BetSettlement;
use crate::dashboard::Dashboard;
use crate::error::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    /// UI clock tick.
    Tick,

    // Input
    SetInputMode(InputMode),
    FocusBet(BetPosition),
    BetInputChar(BetPosition, char),
    BetInputBackspace(BetPosition),

    // Betting (network side handled by the app)
    SubmitBet(BetPosition),
    BetSettled {
        request: BetRequest,
        settlement: BetSettlement,
    },

    // Market data
    MarketDataLoaded(MarketUpdate),
    PositionsLoaded(UserPositions),
    RefreshAll,

    // UI actions
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Connection status
    SetConnected(bool),

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub shown_at: Instant,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            shown_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    /// Whether the toast has outlived its duration at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= Duration::from_secs(self.duration_secs)
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Market dashboard.
    pub dashboard: Dashboard,
    /// User positions.
    pub portfolio: PortfolioState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store around a dashboard.
    pub fn new(dashboard: Dashboard, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::new(),
            dashboard,
            portfolio: PortfolioState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Tick => {
                if self
                    .app
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.is_expired(Instant::now()))
                {
                    self.app.notification = None;
                }
            }

            // Input
            Action::SetInputMode(mode) => self.app.input_mode = mode,
            Action::FocusBet(position) => self.app.input_mode = InputMode::Amount(position),
            Action::BetInputChar(position, c) => self.dashboard.bet_form.push_char(position, c),
            Action::BetInputBackspace(position) => self.dashboard.bet_form.pop_char(position),

            // Handled by the app, which owns the API client.
            Action::SubmitBet(_) | Action::BetSettled { .. } | Action::RefreshAll => {}

            // Market data
            Action::MarketDataLoaded(update) => {
                self.dashboard.apply_update(&update);
                self.app.connected = true;
                self.app.last_update = update
                    .timestamp
                    .or_else(|| Some(chrono::Local::now().naive_local()));
            }
            Action::PositionsLoaded(positions) => {
                self.dashboard.set_balance(positions.balance);
                self.portfolio.apply(positions.positions);
            }

            // UI actions
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Connection status
            Action::SetConnected(connected) => {
                self.app.connected = connected;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }
}
