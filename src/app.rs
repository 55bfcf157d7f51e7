//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use std::io::{self, Stdout};
use std::sync::Arc;

use crate::api::{HttpMarketClient, MarketApi};
use crate::betting::BetSubmitter;
use crate::config::Config;
use crate::dashboard::{Dashboard, LocalClock, SurfaceRegistry};
use crate::error::Result;
use crate::events::{Bindings, Event, EventHandler, EventLoop};
use crate::state::{Action, Notification, Store};
use crate::sync::{self, SyncHandle, SyncLoop};
use crate::ui::Ui;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Action sender, cloned into spawned requests.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Market API.
    api: Arc<dyn MarketApi>,
    /// Bet submission.
    submitter: BetSubmitter,
    /// UI renderer.
    ui: Ui,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        let bindings = Bindings::from_config(&config.keybindings)?;
        let api: Arc<dyn MarketApi> = Arc::new(HttpMarketClient::new(config.api.clone())?);

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let dashboard = Dashboard::new(
            SurfaceRegistry::from_config(&config.ui),
            Box::new(LocalClock),
        );
        let store = Store::new(dashboard, action_tx.clone());

        let submitter = BetSubmitter::new(Arc::clone(&api), action_tx.clone());

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            store,
            event_handler: EventHandler::new(bindings),
            action_rx,
            action_tx,
            api,
            submitter,
            ui: Ui::new(&config.ui),
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        info!(base_url = %self.config.api.base_url, "starting racebook");

        let (mut events, _event_task) = EventLoop::new(self.config.ui.tick_rate()).start();

        // The first poll tick fires immediately and seeds the dashboard.
        let sync = SyncLoop::new(
            Arc::clone(&self.api),
            self.config.api.poll_interval(),
            self.action_tx.clone(),
        )
        .start();

        // Initial balance read
        self.submitter
            .reconciler()
            .reconcile(&mut self.store.dashboard, None);

        let result = self.event_loop(&mut events).await;
        self.shutdown(sync).await;
        result
    }

    async fn event_loop(&mut self, events: &mut mpsc::UnboundedReceiver<Event>) -> Result<()> {
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            let ui = self.ui;
            let store = &self.store;
            self.terminal.draw(|frame| ui.render(frame, store))?;

            tokio::select! {
                // Handle terminal events
                Some(event) = events.recv() => match event {
                    Event::Key(key) => {
                        if let Some(action) = self.event_handler.handle_key(key) {
                            self.handle_action(action)?;
                        }
                    }
                    Event::Tick => self.store.reduce(Action::Tick),
                    Event::Resize(..) => {}
                },

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action)?;
                }

                else => break,
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SubmitBet(position) => {
                if let Err(e) = self.submitter.submit(&mut self.store.dashboard, position) {
                    self.store
                        .reduce(Action::ShowNotification(BetSubmitter::refusal_notice(&e)));
                }
            }
            Action::BetSettled {
                request,
                settlement,
            } => {
                let notification =
                    self.submitter
                        .settle(&mut self.store.dashboard, &request, settlement);
                self.store.reduce(Action::ShowNotification(notification));
            }
            Action::RefreshAll => self.refresh_all()?,
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }

        Ok(())
    }

    /// Re-read market data and balance outside the poll schedule.
    fn refresh_all(&mut self) -> Result<()> {
        let api = Arc::clone(&self.api);
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            sync::poll_once(api.as_ref(), &action_tx).await;
        });

        self.submitter
            .reconciler()
            .reconcile(&mut self.store.dashboard, None);
        self.store
            .dispatch(Action::ShowNotification(Notification::info("Refreshing...")))
    }

    async fn shutdown(&mut self, sync: SyncHandle) {
        sync.stop().await;
        if !self.store.dashboard.bet_form.controls_enabled() {
            warn!("quitting with a bet still in flight");
        }
        info!("racebook stopped");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
