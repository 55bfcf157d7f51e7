//! Display surface registry.
//!
//! Every value the dashboard shows is written into a named surface here and
//! the ratatui widgets only read from it. Surfaces that were not mounted at
//! startup silently ignore writes.

use std::collections::HashMap;

use crate::config::UiConfig;

/// Stable names of the text surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    RobotStatus,
    RaceTimer,
    RaceScore,
    SuccessOdds,
    FailOdds,
    TotalVolume,
    ParticipantCount,
    SuccessPool,
    FailPool,
    UserBalance,
}

impl SurfaceId {
    /// All text surfaces.
    pub const ALL: [SurfaceId; 10] = [
        SurfaceId::RobotStatus,
        SurfaceId::RaceTimer,
        SurfaceId::RaceScore,
        SurfaceId::SuccessOdds,
        SurfaceId::FailOdds,
        SurfaceId::TotalVolume,
        SurfaceId::ParticipantCount,
        SurfaceId::SuccessPool,
        SurfaceId::FailPool,
        SurfaceId::UserBalance,
    ];

    /// Identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RobotStatus => "robot-status",
            Self::RaceTimer => "race-timer",
            Self::RaceScore => "race-score",
            Self::SuccessOdds => "success-odds",
            Self::FailOdds => "fail-odds",
            Self::TotalVolume => "total-volume",
            Self::ParticipantCount => "participant-count",
            Self::SuccessPool => "success-volume",
            Self::FailPool => "fail-volume",
            Self::UserBalance => "user-balance",
        }
    }
}

/// Odds visualization: `[success, fail]` percentages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OddsChart {
    pub data: [f64; 2],
    /// Number of redraws requested so far.
    pub redraws: u64,
}

impl OddsChart {
    /// Replace the dataset and request a redraw.
    pub fn update(&mut self, success_odds: f64, fail_odds: f64) {
        self.data = [success_odds, fail_odds];
        self.redraws += 1;
    }
}

/// Volume trend visualization: one label per point and two series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub success: Vec<f64>,
    pub fail: Vec<f64>,
    /// Number of redraws requested so far.
    pub redraws: u64,
}

impl TrendChart {
    /// Replace all series and request a redraw.
    pub fn redraw(&mut self, labels: Vec<String>, success: Vec<f64>, fail: Vec<f64>) {
        self.labels = labels;
        self.success = success;
        self.fail = fail;
        self.redraws += 1;
    }

    /// Largest value across both series.
    pub fn max_value(&self) -> f64 {
        self.success
            .iter()
            .chain(self.fail.iter())
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Registry of mounted display surfaces, resolved once at startup.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    text: HashMap<SurfaceId, String>,
    odds_chart: Option<OddsChart>,
    trend_chart: Option<TrendChart>,
}

impl SurfaceRegistry {
    /// A registry with nothing mounted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every text surface and both charts mounted.
    pub fn full() -> Self {
        Self::empty()
            .with_text_surfaces(SurfaceId::ALL)
            .with_odds_chart()
            .with_trend_chart()
    }

    /// All text surfaces, charts according to the UI configuration.
    pub fn from_config(config: &UiConfig) -> Self {
        let mut registry = Self::empty().with_text_surfaces(SurfaceId::ALL);
        if config.show_odds_chart {
            registry = registry.with_odds_chart();
        }
        if config.show_volume_chart {
            registry = registry.with_trend_chart();
        }
        registry
    }

    /// Mount text surfaces.
    pub fn with_text_surfaces(mut self, ids: impl IntoIterator<Item = SurfaceId>) -> Self {
        for id in ids {
            self.text.entry(id).or_default();
        }
        self
    }

    /// Mount the odds chart.
    pub fn with_odds_chart(mut self) -> Self {
        self.odds_chart.get_or_insert_with(OddsChart::default);
        self
    }

    /// Mount the trend chart.
    pub fn with_trend_chart(mut self) -> Self {
        self.trend_chart.get_or_insert_with(TrendChart::default);
        self
    }

    /// Overwrite a text surface. Returns false if it is not mounted.
    pub fn write(&mut self, id: SurfaceId, value: impl Into<String>) -> bool {
        match self.text.get_mut(&id) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Current text of a surface, if mounted.
    pub fn text(&self, id: SurfaceId) -> Option<&str> {
        self.text.get(&id).map(String::as_str)
    }

    pub fn is_mounted(&self, id: SurfaceId) -> bool {
        self.text.contains_key(&id)
    }

    pub fn odds_chart(&self) -> Option<&OddsChart> {
        self.odds_chart.as_ref()
    }

    pub fn odds_chart_mut(&mut self) -> Option<&mut OddsChart> {
        self.odds_chart.as_mut()
    }

    pub fn trend_chart(&self) -> Option<&TrendChart> {
        self.trend_chart.as_ref()
    }

    pub fn trend_chart_mut(&mut self) -> Option<&mut TrendChart> {
        self.trend_chart.as_mut()
    }
}
