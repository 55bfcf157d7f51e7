//! UI rendering using ratatui.
//!
//! Widgets only read from the store; every displayed value was written into
//! the dashboard's surfaces by the reducer.

mod layout;
mod widgets;

pub use layout::{Layout, Panels};
pub use widgets::{
    BetPanel, HelpPanel, KpiRow, OddsCards, OddsChartWidget, PositionList, StatusBar,
    VolumeChartWidget,
};

use crate::config::UiConfig;
use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    show_positions: bool,
}

impl Ui {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            show_positions: config.show_positions,
        }
    }

    /// Render the entire UI.
    pub fn render(&self, frame: &mut Frame, store: &Store) {
        let surfaces = &store.dashboard.surfaces;
        let layout = Layout::new(
            frame.area(),
            Panels {
                odds_chart: surfaces.odds_chart().is_some(),
                trend_chart: surfaces.trend_chart().is_some(),
                positions: self.show_positions,
            },
        );

        StatusBar::render(frame, layout.status_area, store);
        KpiRow::render(frame, layout.kpi_area, surfaces);
        OddsCards::render(frame, layout.odds_area, surfaces);

        if let (Some(area), Some(chart)) = (layout.odds_chart_area, surfaces.odds_chart()) {
            OddsChartWidget::render(frame, area, chart);
        }

        if let (Some(area), Some(chart)) = (layout.trend_area, surfaces.trend_chart()) {
            VolumeChartWidget::render(frame, area, chart);
        }

        BetPanel::render(frame, layout.bet_area, store);

        if let Some(area) = layout.positions_area {
            PositionList::render(frame, area, store);
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, ManualClock, SurfaceRegistry};
    use crate::state::{Action, MarketSnapshot, MarketUpdate, Notification, RaceStatus};
    use ratatui::{Terminal, backend::TestBackend};
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn store(surfaces: SurfaceRegistry) -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(
            Dashboard::new(surfaces, Box::new(ManualClock::new("02:05 PM"))),
            tx,
        )
    }

    fn draw(ui: Ui, store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| ui.render(frame, store)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_market_values() {
        let mut store = store(SurfaceRegistry::full());
        store.reduce(Action::MarketDataLoaded(MarketUpdate::new(
            RaceStatus {
                status: "RUNNING".to_string(),
                elapsed_seconds: 42,
                score: 3.0,
            },
            MarketSnapshot {
                success_odds: 40.0,
                fail_odds: 60.0,
                total_volume: dec!(1000),
                participants: 5,
                success_volume: dec!(400),
                fail_volume: dec!(600),
            },
        )));

        let screen = draw(Ui::new(&UiConfig::default()), &store);
        assert!(screen.contains("RUNNING"));
        assert!(screen.contains("42s"));
        assert!(screen.contains("40.0%"));
        assert!(screen.contains("$1,000"));
        assert!(screen.contains("Connected"));
        assert!(screen.contains("Volume Trend"));
    }

    #[test]
    fn test_hidden_panels_are_not_drawn() {
        let store = store(SurfaceRegistry::empty().with_text_surfaces(crate::dashboard::SurfaceId::ALL));
        let config = UiConfig {
            show_positions: false,
            ..UiConfig::default()
        };

        let screen = draw(Ui::new(&config), &store);
        assert!(!screen.contains("Volume Trend"));
        assert!(!screen.contains(" Odds "));
        assert!(!screen.contains("Bets"));
    }

    #[test]
    fn test_overlays() {
        let mut store = store(SurfaceRegistry::full());
        store.reduce(Action::ShowNotification(Notification::error(
            "Error placing bet: Market closed",
        )));
        let screen = draw(Ui::new(&UiConfig::default()), &store);
        assert!(screen.contains("Market closed"));

        store.reduce(Action::ToggleHelp);
        let screen = draw(Ui::new(&UiConfig::default()), &store);
        assert!(screen.contains("Place bet"));
    }
}
