//! The market dashboard: surfaces, volume history, bet form and balance.
//!
//! A single [`Dashboard`] is created at startup and owned by the store. All
//! chart and history state lives in it, so several independent dashboards
//! (or tests) never share anything.

mod bet_form;
mod history;
mod renderer;
mod surfaces;

pub use bet_form::BetForm;
pub use history::{HISTORY_CAPACITY, LocalClock, TimeLabeler, VolumeHistoryStore, VolumeSample};
pub use renderer::{MarketRenderer, RenderOutcome, format_balance, format_currency, format_odds};
pub use surfaces::{OddsChart, SurfaceId, SurfaceRegistry, TrendChart};

#[cfg(test)]
pub(crate) use history::tests::ManualClock;

use rust_decimal::Decimal;

use crate::state::{MarketSnapshot, MarketUpdate, RaceStatus};

/// Dashboard controller state.
#[derive(Debug)]
pub struct Dashboard {
    /// Mounted display surfaces.
    pub surfaces: SurfaceRegistry,
    /// Pool volume history behind the trend chart.
    pub history: VolumeHistoryStore,
    /// Amount inputs and bet controls.
    pub bet_form: BetForm,
    /// Race status as currently displayed.
    race: RaceStatus,
    /// Balance as currently displayed. Provisional until reconciled.
    balance: Decimal,
    seeded: bool,
}

impl Dashboard {
    /// Create a dashboard over the given surfaces.
    pub fn new(surfaces: SurfaceRegistry, labeler: Box<dyn TimeLabeler>) -> Self {
        let mut dashboard = Self {
            surfaces,
            history: VolumeHistoryStore::new(labeler),
            bet_form: BetForm::default(),
            race: RaceStatus::default(),
            balance: Decimal::ZERO,
            seeded: false,
        };
        dashboard.set_balance(Decimal::ZERO);
        dashboard
    }

    /// Whether the history has been seeded from a first market read.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Seed the volume history from the first market read and render it.
    ///
    /// Only the first call initializes the history; later calls just render.
    pub fn seed(&mut self, update: &MarketUpdate) -> RenderOutcome {
        if self.seeded {
            tracing::debug!("dashboard already seeded, rendering instead");
            return self.render(&update.race, &update.market);
        }

        self.history
            .initialize(update.market.success_volume, update.market.fail_volume);
        self.seeded = true;

        let outcome = self.render(&update.race, &update.market);
        let trend_redrawn = MarketRenderer::redraw_trend(&mut self.surfaces, &self.history);
        RenderOutcome {
            trend_redrawn,
            ..outcome
        }
    }

    /// Apply a market read: seeds on the first call, renders afterwards.
    pub fn apply_update(&mut self, update: &MarketUpdate) -> RenderOutcome {
        if self.seeded {
            self.render(&update.race, &update.market)
        } else {
            self.seed(update)
        }
    }

    /// Render a race status and market snapshot.
    pub fn render(&mut self, race: &RaceStatus, market: &MarketSnapshot) -> RenderOutcome {
        self.race = race.clone();
        // A render before seeding initializes the history through maybe_append.
        self.seeded = true;
        MarketRenderer::render(&mut self.surfaces, &mut self.history, race, market)
    }

    /// Render a market snapshot with the race status already on screen.
    pub fn render_market(&mut self, market: &MarketSnapshot) -> RenderOutcome {
        let race = self.race.clone();
        self.render(&race, market)
    }

    /// Race status as currently displayed.
    pub fn displayed_race(&self) -> &RaceStatus {
        &self.race
    }

    /// Balance as currently displayed.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Display a balance.
    pub fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
        self.surfaces
            .write(SurfaceId::UserBalance, format_balance(balance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn update(success: Decimal, fail: Decimal) -> MarketUpdate {
        MarketUpdate::new(
            RaceStatus {
                status: "RUNNING".to_string(),
                elapsed_seconds: 12,
                score: 4.0,
            },
            MarketSnapshot {
                success_odds: 40.0,
                fail_odds: 60.0,
                total_volume: success + fail,
                participants: 2,
                success_volume: success,
                fail_volume: fail,
            },
        )
    }

    fn dashboard(clock: &ManualClock) -> Dashboard {
        Dashboard::new(SurfaceRegistry::full(), Box::new(clock.clone()))
    }

    #[test]
    fn test_new_dashboard_shows_zero_balance() {
        let dashboard = dashboard(&ManualClock::new("02:05 PM"));
        assert_eq!(dashboard.surfaces.text(SurfaceId::UserBalance), Some("$0 FAN"));
        assert!(!dashboard.is_seeded());
    }

    #[test]
    fn test_seed_draws_single_point_trend() {
        let mut dashboard = dashboard(&ManualClock::new("02:05 PM"));
        let outcome = dashboard.seed(&update(dec!(40), dec!(60)));

        assert!(outcome.trend_redrawn);
        assert_eq!(dashboard.history.len(), 1);
        let trend = dashboard.surfaces.trend_chart().unwrap();
        assert_eq!(trend.success, vec![40.0]);
        assert_eq!(trend.fail, vec![60.0]);
    }

    #[test]
    fn test_seed_then_polls() {
        let mut dashboard = dashboard(&ManualClock::new("02:05 PM"));
        dashboard.apply_update(&update(dec!(40), dec!(60)));
        let redraws_after_seed = dashboard.surfaces.trend_chart().unwrap().redraws;

        let outcome = dashboard.apply_update(&update(dec!(40), dec!(60)));
        assert!(!outcome.trend_redrawn);
        assert_eq!(dashboard.history.len(), 1);
        assert_eq!(
            dashboard.surfaces.trend_chart().unwrap().redraws,
            redraws_after_seed
        );

        let outcome = dashboard.apply_update(&update(dec!(45), dec!(55)));
        assert!(outcome.trend_redrawn);
        let trend = dashboard.surfaces.trend_chart().unwrap();
        assert_eq!(trend.success, vec![40.0, 45.0]);
        assert_eq!(trend.fail, vec![60.0, 55.0]);
        assert_eq!(trend.redraws, redraws_after_seed + 1);
    }

    #[test]
    fn test_seed_only_initializes_once() {
        let mut dashboard = dashboard(&ManualClock::new("02:05 PM"));
        dashboard.seed(&update(dec!(40), dec!(60)));
        dashboard.seed(&update(dec!(50), dec!(60)));

        assert_eq!(dashboard.history.len(), 2);
    }

    #[test]
    fn test_render_market_keeps_displayed_race() {
        let mut dashboard = dashboard(&ManualClock::new("02:05 PM"));
        dashboard.seed(&update(dec!(40), dec!(60)));

        let mut market = update(dec!(90), dec!(60)).market;
        market.participants = 3;
        dashboard.render_market(&market);

        assert_eq!(dashboard.displayed_race().elapsed_seconds, 12);
        assert_eq!(dashboard.surfaces.text(SurfaceId::RaceTimer), Some("12s"));
        assert_eq!(dashboard.surfaces.text(SurfaceId::ParticipantCount), Some("3"));
    }
}
