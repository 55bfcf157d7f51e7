//! Periodic market data polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::MarketApi;
use crate::state::Action;

/// Polls `/api/market-data` on a fixed interval and forwards every successful
/// read to the event loop.
///
/// Failed reads are logged and reported as a disconnect; the displayed state
/// is left alone and the next tick tries again. There is no backoff.
pub struct SyncLoop {
    api: Arc<dyn MarketApi>,
    interval: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl SyncLoop {
    pub fn new(
        api: Arc<dyn MarketApi>,
        interval: Duration,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            api,
            interval,
            action_tx,
        }
    }

    /// Spawn the loop. The first read happens immediately.
    pub fn start(self) -> SyncHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let delivered = tokio::select! {
                    _ = token.cancelled() => break,
                    delivered = poll_once(self.api.as_ref(), &self.action_tx) => delivered,
                };

                if !delivered {
                    debug!("action channel closed, stopping market sync");
                    break;
                }
            }
        });

        SyncHandle {
            cancel,
            handle: Some(handle),
        }
    }
}

/// Issue one market read and forward the outcome. Returns false once the
/// receiving side is gone.
pub async fn poll_once(api: &dyn MarketApi, action_tx: &mpsc::UnboundedSender<Action>) -> bool {
    let action = match api.fetch_market_data().await {
        Ok(update) => {
            debug!(
                status = %update.race.status,
                success_volume = %update.market.success_volume,
                fail_volume = %update.market.fail_volume,
                "market data polled"
            );
            Action::MarketDataLoaded(update)
        }
        Err(e) => {
            warn!("Error polling market data: {}", e);
            Action::SetConnected(false)
        }
    };

    action_tx.send(action).is_ok()
}

/// Handle to a running [`SyncLoop`]. Dropping it cancels the loop.
pub struct SyncHandle {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Cancel the loop and wait for it to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            warn!("market sync task ended abnormally: {}", e);
        }
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
