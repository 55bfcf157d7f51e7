//! Bet submission and balance reconciliation.
//!
//! Both follow the same shape: the event loop mutates the dashboard
//! synchronously, spawns the request, and the result comes back later as an
//! [`Action`] so the loop never waits on the network.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::MarketApi;
use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::state::{Action, BetPosition, BetReceipt, BetRequest, Notification};

/// How a submitted bet ended.
#[derive(Debug, Clone, PartialEq)]
pub enum BetSettlement {
    Accepted(BetReceipt),
    /// `reason` is what the user is shown.
    Rejected { reason: String },
}

/// Keeps the displayed balance in line with the server.
///
/// Provisional write, authoritative overwrite: an optimistic value is shown
/// immediately, then replaced by whatever the server reports.
pub struct BalanceReconciler {
    api: Arc<dyn MarketApi>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl BalanceReconciler {
    pub fn new(api: Arc<dyn MarketApi>, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { api, action_tx }
    }

    /// Display `optimistic` (if any) and start an authoritative read. The read
    /// lands as [`Action::PositionsLoaded`]; on failure the display is left
    /// as it is.
    pub fn reconcile(&self, dashboard: &mut Dashboard, optimistic: Option<Decimal>) -> JoinHandle<()> {
        if let Some(balance) = optimistic {
            dashboard.set_balance(balance);
        }

        let api = Arc::clone(&self.api);
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.fetch_user_positions().await {
                Ok(positions) => {
                    if action_tx.send(Action::PositionsLoaded(positions)).is_err() {
                        debug!("action channel closed, dropping balance read");
                    }
                }
                Err(e) => warn!("Error fetching user balance: {}", e),
            }
        })
    }
}

/// Validates and submits bets from the bet form.
pub struct BetSubmitter {
    api: Arc<dyn MarketApi>,
    action_tx: mpsc::UnboundedSender<Action>,
    reconciler: BalanceReconciler,
}

impl BetSubmitter {
    pub fn new(api: Arc<dyn MarketApi>, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let reconciler = BalanceReconciler::new(Arc::clone(&api), action_tx.clone());
        Self {
            api,
            action_tx,
            reconciler,
        }
    }

    /// The reconciler used after accepted bets.
    pub fn reconciler(&self) -> &BalanceReconciler {
        &self.reconciler
    }

    /// Check the amount typed for `position` against the displayed balance.
    ///
    /// The displayed balance may be stale; the server still has the final say.
    pub fn validate(dashboard: &Dashboard, position: BetPosition) -> Result<BetRequest> {
        let amount = dashboard
            .bet_form
            .input(position)
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or_else(|| Error::validation("Please enter a valid amount"))?;

        let balance = dashboard.balance();
        if amount > balance {
            return Err(Error::insufficient_funds(balance));
        }

        Ok(BetRequest { position, amount })
    }

    /// Validate the bet, disable the bet controls and send the request.
    ///
    /// Local failures return an error and send nothing. Otherwise exactly one
    /// [`Action::BetSettled`] follows, whatever happens to the request.
    pub fn submit(&self, dashboard: &mut Dashboard, position: BetPosition) -> Result<JoinHandle<()>> {
        if !dashboard.bet_form.controls_enabled() {
            return Err(Error::application("A bet is already being submitted"));
        }

        let request = Self::validate(dashboard, position)?;
        dashboard.bet_form.disable_controls();
        info!(%position, amount = %request.amount, "submitting bet");

        let api = Arc::clone(&self.api);
        let guard = SettleGuard::new(self.action_tx.clone(), request.clone());
        Ok(tokio::spawn(async move {
            let settlement = match api.place_bet(request).await {
                Ok(receipt) => BetSettlement::Accepted(receipt),
                Err(e) => {
                    warn!("Error placing bet: {}", e);
                    BetSettlement::Rejected {
                        reason: e.bet_failure_reason().to_string(),
                    }
                }
            };
            guard.finish(settlement);
        }))
    }

    /// Toast for a bet that [`submit`](Self::submit) refused to send.
    pub fn refusal_notice(error: &Error) -> Notification {
        if error.is_local() {
            debug!("bet refused locally: {}", error);
        } else {
            warn!("bet not submitted: {}", error);
        }
        Notification::error(error.to_string())
    }

    /// Apply the outcome of a submission and return the toast to show.
    ///
    /// Controls are re-enabled first, on every outcome.
    pub fn settle(
        &self,
        dashboard: &mut Dashboard,
        request: &BetRequest,
        settlement: BetSettlement,
    ) -> Notification {
        dashboard.bet_form.enable_controls();

        match settlement {
            BetSettlement::Accepted(receipt) => {
                info!(
                    position = %request.position,
                    amount = %request.amount,
                    new_balance = %receipt.new_balance,
                    "bet accepted"
                );
                self.reconciler
                    .reconcile(dashboard, Some(receipt.new_balance));
                dashboard.bet_form.clear(request.position);
                dashboard.render_market(&receipt.market);
                Notification::success(format!(
                    "Bet placed: ${} on {}",
                    request.amount.normalize(),
                    request.position
                ))
            }
            BetSettlement::Rejected { reason } => {
                Notification::error(format!("Error placing bet: {}", reason))
            }
        }
    }
}

/// Sends the settlement of one submission exactly once. If the request task
/// ends without settling (panic, abort), dropping the guard settles it as
/// rejected so the controls come back.
struct SettleGuard {
    action_tx: mpsc::UnboundedSender<Action>,
    pending: Option<BetRequest>,
}

impl SettleGuard {
    fn new(action_tx: mpsc::UnboundedSender<Action>, request: BetRequest) -> Self {
        Self {
            action_tx,
            pending: Some(request),
        }
    }

    fn finish(mut self, settlement: BetSettlement) {
        self.send(settlement);
    }

    fn send(&mut self, settlement: BetSettlement) {
        if let Some(request) = self.pending.take()
            && self
                .action_tx
                .send(Action::BetSettled {
                    request,
                    settlement,
                })
                .is_err()
        {
            debug!("action channel closed, dropping bet settlement");
        }
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        self.send(BetSettlement::Rejected {
            reason: "Unknown error".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketApi;
    use crate::dashboard::{ManualClock, SurfaceId, SurfaceRegistry};
    use crate::state::{MarketSnapshot, MarketUpdate, NotificationLevel, RaceStatus, Store, UserPositions};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn market(success: Decimal, fail: Decimal, participants: u64) -> MarketSnapshot {
        MarketSnapshot {
            success_odds: 50.0,
            fail_odds: 50.0,
            total_volume: success + fail,
            participants,
            success_volume: success,
            fail_volume: fail,
        }
    }

    fn store_with_balance(
        balance: Decimal,
    ) -> (Store, mpsc::UnboundedSender<Action>, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut dashboard = Dashboard::new(
            SurfaceRegistry::full(),
            Box::new(ManualClock::new("02:05 PM")),
        );
        dashboard.seed(&MarketUpdate::new(
            RaceStatus {
                status: "RUNNING".to_string(),
                elapsed_seconds: 30,
                score: 12.0,
            },
            market(dec!(500), dec!(500), 2),
        ));
        dashboard.set_balance(balance);
        (Store::new(dashboard, tx.clone()), tx, rx)
    }

    fn no_network() -> MockMarketApi {
        let mut api = MockMarketApi::new();
        api.expect_place_bet().times(0);
        api.expect_fetch_user_positions().times(0);
        api.expect_fetch_market_data().times(0);
        api
    }

    #[tokio::test]
    async fn test_non_positive_amounts_never_reach_network() {
        let (mut store, tx, mut rx) = store_with_balance(dec!(1000));
        let submitter = BetSubmitter::new(Arc::new(no_network()), tx);

        for raw in ["0", "-5", "", "abc", "   "] {
            store.dashboard.bet_form.set_input(BetPosition::Success, raw);
            let err = submitter
                .submit(&mut store.dashboard, BetPosition::Success)
                .unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "input {raw:?}");
            assert!(store.dashboard.bet_form.controls_enabled());
        }

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_refused_bets_toast_as_errors() {
        let invalid = BetSubmitter::refusal_notice(&Error::validation("Please enter a valid amount"));
        assert_eq!(invalid.level, NotificationLevel::Error);
        assert_eq!(invalid.message, "Please enter a valid amount");

        let too_big = BetSubmitter::refusal_notice(&Error::insufficient_funds(dec!(100)));
        assert_eq!(too_big.level, NotificationLevel::Error);
        assert_eq!(too_big.message, "Insufficient balance. Maximum: $100");
    }

    #[tokio::test]
    async fn test_amount_above_balance_is_rejected_locally() {
        let (mut store, tx, mut rx) = store_with_balance(dec!(100));
        let submitter = BetSubmitter::new(Arc::new(no_network()), tx);
        store.dashboard.bet_form.set_input(BetPosition::Fail, "150");

        let err = submitter
            .submit(&mut store.dashboard, BetPosition::Fail)
            .unwrap_err();

        assert!(matches!(err, Error::InsufficientFunds { maximum } if maximum == dec!(100)));
        assert_eq!(err.to_string(), "Insufficient balance. Maximum: $100");
        assert!(store.dashboard.bet_form.controls_enabled());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_accepted_bet_then_reconciled_balance() {
        let (mut store, tx, mut rx) = store_with_balance(dec!(1000));

        let mut api = MockMarketApi::new();
        api.expect_place_bet()
            .withf(|request| request.position == BetPosition::Success && request.amount == dec!(50))
            .times(1)
            .returning(|_| {
                Ok(BetReceipt {
                    new_balance: dec!(950),
                    market: market(dec!(550), dec!(500), 3),
                })
            });
        // The server disagrees with its own receipt; the read wins.
        api.expect_fetch_user_positions()
            .times(1)
            .returning(|| {
                Ok(UserPositions {
                    balance: dec!(940),
                    positions: Vec::new(),
                })
            });
        let submitter = BetSubmitter::new(Arc::new(api), tx);

        store.dashboard.bet_form.set_input(BetPosition::Success, "50");
        let request_task = submitter
            .submit(&mut store.dashboard, BetPosition::Success)
            .unwrap();
        assert!(!store.dashboard.bet_form.controls_enabled());
        request_task.await.unwrap();

        let Some(Action::BetSettled {
            request,
            settlement,
        }) = rx.recv().await
        else {
            panic!("expected a bet settlement");
        };
        let notification = submitter.settle(&mut store.dashboard, &request, settlement);

        assert_eq!(notification.level, NotificationLevel::Success);
        assert_eq!(notification.message, "Bet placed: $50 on SUCCESS");
        assert!(store.dashboard.bet_form.controls_enabled());
        assert_eq!(store.dashboard.bet_form.input(BetPosition::Success), "");
        assert_eq!(store.dashboard.balance(), dec!(950));
        assert_eq!(
            store.dashboard.surfaces.text(SurfaceId::ParticipantCount),
            Some("3")
        );
        // Race fields come from what was already on screen.
        assert_eq!(store.dashboard.surfaces.text(SurfaceId::RaceTimer), Some("30s"));
        assert_eq!(store.dashboard.history.len(), 2);

        let reconciled = rx.recv().await.unwrap();
        assert!(matches!(reconciled, Action::PositionsLoaded(_)));
        store.reduce(reconciled);
        assert_eq!(store.dashboard.balance(), dec!(940));
        assert_eq!(
            store.dashboard.surfaces.text(SurfaceId::UserBalance),
            Some("$940 FAN")
        );
    }

    #[tokio::test]
    async fn test_server_rejection_leaves_state_untouched() {
        let (mut store, tx, mut rx) = store_with_balance(dec!(1000));

        let mut api = MockMarketApi::new();
        api.expect_place_bet()
            .times(1)
            .returning(|_| Err(Error::rejected(Some("Insufficient balance".to_string()))));
        api.expect_fetch_user_positions().times(0);
        let submitter = BetSubmitter::new(Arc::new(api), tx);

        store.dashboard.bet_form.set_input(BetPosition::Fail, "20");
        submitter
            .submit(&mut store.dashboard, BetPosition::Fail)
            .unwrap()
            .await
            .unwrap();

        let Some(Action::BetSettled {
            request,
            settlement,
        }) = rx.recv().await
        else {
            panic!("expected a bet settlement");
        };
        let notification = submitter.settle(&mut store.dashboard, &request, settlement);

        assert_eq!(notification.level, NotificationLevel::Error);
        assert_eq!(notification.message, "Error placing bet: Insufficient balance");
        assert!(store.dashboard.bet_form.controls_enabled());
        assert_eq!(store.dashboard.balance(), dec!(1000));
        assert_eq!(store.dashboard.bet_form.input(BetPosition::Fail), "20");
        assert_eq!(store.dashboard.history.len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_uses_generic_message() {
        let (mut store, tx, mut rx) = store_with_balance(dec!(1000));

        let mut api = MockMarketApi::new();
        api.expect_place_bet()
            .times(1)
            .returning(|_| Err(Error::network("connection reset")));
        let submitter = BetSubmitter::new(Arc::new(api), tx);

        store.dashboard.bet_form.set_input(BetPosition::Success, "1");
        submitter
            .submit(&mut store.dashboard, BetPosition::Success)
            .unwrap()
            .await
            .unwrap();

        let Some(Action::BetSettled {
            request,
            settlement,
        }) = rx.recv().await
        else {
            panic!("expected a bet settlement");
        };
        let notification = submitter.settle(&mut store.dashboard, &request, settlement);
        assert_eq!(notification.message, "Error placing bet: Unknown error");
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_refused() {
        let (mut store, tx, _rx) = store_with_balance(dec!(1000));
        let submitter = BetSubmitter::new(Arc::new(no_network()), tx);

        store.dashboard.bet_form.disable_controls();
        store.dashboard.bet_form.set_input(BetPosition::Success, "10");

        let err = submitter
            .submit(&mut store.dashboard, BetPosition::Success)
            .unwrap_err();
        assert!(matches!(err, Error::Application(_)));
    }

    #[tokio::test]
    async fn test_reconcile_failure_keeps_optimistic_value() {
        let (mut store, tx, mut rx) = store_with_balance(dec!(1000));

        let mut api = MockMarketApi::new();
        api.expect_fetch_user_positions()
            .times(1)
            .returning(|| Err(Error::network("timeout")));
        let reconciler = BalanceReconciler::new(Arc::new(api), tx);

        reconciler
            .reconcile(&mut store.dashboard, Some(dec!(975)))
            .await
            .unwrap();

        assert_eq!(store.dashboard.balance(), dec!(975));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reconcile_without_optimistic_value() {
        let (mut store, tx, mut rx) = store_with_balance(dec!(0));

        let mut api = MockMarketApi::new();
        api.expect_fetch_user_positions().times(1).returning(|| {
            Ok(UserPositions {
                balance: dec!(1000),
                positions: Vec::new(),
            })
        });
        let reconciler = BalanceReconciler::new(Arc::new(api), tx);

        reconciler.reconcile(&mut store.dashboard, None).await.unwrap();
        assert_eq!(store.dashboard.balance(), dec!(0));

        store.reduce(rx.recv().await.unwrap());
        assert_eq!(store.dashboard.balance(), dec!(1000));
    }

    #[test]
    fn test_dropped_guard_settles_as_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let request = BetRequest {
            position: BetPosition::Fail,
            amount: dec!(5),
        };

        drop(SettleGuard::new(tx.clone(), request.clone()));
        let Ok(Action::BetSettled { settlement, .. }) = rx.try_recv() else {
            panic!("expected a bet settlement");
        };
        assert_eq!(
            settlement,
            BetSettlement::Rejected {
                reason: "Unknown error".to_string()
            }
        );

        // A finished guard does not settle twice.
        SettleGuard::new(tx, request).finish(BetSettlement::Rejected {
            reason: "nope".to_string(),
        });
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
