//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Race and account cards.
    pub kpi_area: Rect,
    /// Odds cards and pool sizes.
    pub odds_area: Rect,
    /// Odds bar chart, when mounted.
    pub odds_chart_area: Option<Rect>,
    /// Volume trend chart, when mounted.
    pub trend_area: Option<Rect>,
    /// Bet amount inputs.
    pub bet_area: Rect,
    /// Placed bets table, when shown.
    pub positions_area: Option<Rect>,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

/// Which optional panels to lay out.
#[derive(Debug, Clone, Copy)]
pub struct Panels {
    pub odds_chart: bool,
    pub trend_chart: bool,
    pub positions: bool,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, panels: Panels) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                                   // Status bar
                Constraint::Length(3),                                   // KPI cards
                Constraint::Min(10),                                     // Market panels
                Constraint::Length(3),                                   // Bet inputs
                Constraint::Length(if panels.positions { 8 } else { 0 }), // Positions
            ])
            .split(area);

        let market = if panels.trend_chart {
            RatatuiLayout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[2])
        } else {
            RatatuiLayout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(100), Constraint::Length(0)])
                .split(chunks[2])
        };

        let (odds_area, odds_chart_area) = if panels.odds_chart {
            let odds = RatatuiLayout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(6), Constraint::Min(0)])
                .split(market[0]);
            (odds[0], Some(odds[1]))
        } else {
            (market[0], None)
        };

        // Notification area sits across the middle of the screen
        let notification_area = Rect {
            x: area.width / 4,
            y: (area.height / 2).saturating_sub(2),
            width: area.width / 2,
            height: 3.min(area.height),
        };

        Self {
            status_area: chunks[0],
            kpi_area: chunks[1],
            odds_area,
            odds_chart_area,
            trend_area: panels.trend_chart.then_some(market[1]),
            bet_area: chunks[3],
            positions_area: panels.positions.then_some(chunks[4]),
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
