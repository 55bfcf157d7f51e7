//! Pushes market and race figures into display surfaces.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::history::VolumeHistoryStore;
use super::surfaces::{SurfaceId, SurfaceRegistry};
use crate::state::{MarketSnapshot, RaceStatus};

/// What a render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOutcome {
    /// A new history sample was recorded.
    pub sample_appended: bool,
    /// The trend chart was redrawn (appended and mounted).
    pub trend_redrawn: bool,
}

/// Writes market state into surfaces and keeps the charts in step with the
/// volume history.
pub struct MarketRenderer;

impl MarketRenderer {
    /// Render one `(race, market)` pair.
    ///
    /// Every step writes to its own surface; unmounted surfaces are skipped
    /// without affecting the others.
    pub fn render(
        surfaces: &mut SurfaceRegistry,
        history: &mut VolumeHistoryStore,
        race: &RaceStatus,
        market: &MarketSnapshot,
    ) -> RenderOutcome {
        Self::write_race(surfaces, race);
        Self::write_market(surfaces, market);

        if let Some(chart) = surfaces.odds_chart_mut() {
            chart.update(market.success_odds, market.fail_odds);
        }

        let sample_appended = history.maybe_append(market.success_volume, market.fail_volume);
        let trend_redrawn = sample_appended && Self::redraw_trend(surfaces, history);

        RenderOutcome {
            sample_appended,
            trend_redrawn,
        }
    }

    /// Rebuild the trend chart from the full history. Returns false if the
    /// chart is not mounted.
    pub fn redraw_trend(surfaces: &mut SurfaceRegistry, history: &VolumeHistoryStore) -> bool {
        let Some(chart) = surfaces.trend_chart_mut() else {
            return false;
        };

        let labels = history.labels().iter().cloned().collect();
        let success = history.success_series().iter().map(to_plot).collect();
        let fail = history.fail_series().iter().map(to_plot).collect();
        chart.redraw(labels, success, fail);
        true
    }

    fn write_race(surfaces: &mut SurfaceRegistry, race: &RaceStatus) {
        surfaces.write(SurfaceId::RobotStatus, race.status.as_str());
        surfaces.write(SurfaceId::RaceTimer, format!("{}s", race.elapsed_seconds));
        surfaces.write(SurfaceId::RaceScore, race.score.to_string());
    }

    fn write_market(surfaces: &mut SurfaceRegistry, market: &MarketSnapshot) {
        surfaces.write(SurfaceId::SuccessOdds, format_odds(market.success_odds));
        surfaces.write(SurfaceId::FailOdds, format_odds(market.fail_odds));
        surfaces.write(SurfaceId::TotalVolume, format_currency(market.total_volume));
        surfaces.write(SurfaceId::ParticipantCount, market.participants.to_string());
        surfaces.write(
            SurfaceId::SuccessPool,
            format!("Pool: {}", format_currency(market.success_volume)),
        );
        surfaces.write(
            SurfaceId::FailPool,
            format!("Pool: {}", format_currency(market.fail_volume)),
        );
    }
}

fn to_plot(value: &Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// `62.5` -> `62.5%`, one decimal place.
pub fn format_odds(odds: f64) -> String {
    format!("{:.1}%", odds)
}

/// Thousands-grouped dollars with up to three fraction digits, e.g. `$1,234.5`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();

    match digits.split_once('.') {
        Some((whole, fraction)) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(&digits)),
    }
}

/// Balance display, e.g. `$950 FAN`.
pub fn format_balance(balance: Decimal) -> String {
    format!("${} FAN", balance.normalize())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
