//! Event handling for Racebook.
//!
//! Terminal input and a UI clock tick are merged onto one channel that the
//! app drains alongside its action channel.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{Bindings, KeyBinding};

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Terminal event types.
#[derive(Debug, Clone)]
pub enum Event {
    /// UI clock tick.
    Tick,
    /// Key press event.
    Key(KeyEvent),
    /// Terminal resize event.
    Resize(u16, u16),
}

/// Event loop for handling terminal events.
pub struct EventLoop {
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    tick_rate: Duration,
}

impl EventLoop {
    /// Create a new event loop ticking at `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx,
            tick_rate,
        }
    }

    /// Start reading the terminal. The task ends when the receiver is dropped
    /// or the terminal stream closes.
    pub fn start(self) -> (mpsc::UnboundedReceiver<Event>, JoinHandle<()>) {
        let event_tx = self.event_tx;
        let tick_rate = self.tick_rate;

        let handle = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let event = tokio::select! {
                    _ = tick_interval.tick() => Event::Tick,
                    maybe_event = reader.next() => match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            warn!("Error reading terminal event: {}", e);
                            continue;
                        }
                        None => break,
                    },
                };

                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        (self.event_rx, handle)
    }
}
