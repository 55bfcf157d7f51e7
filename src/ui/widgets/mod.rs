//! TUI widgets.

mod bet_panel;
mod cards;
mod help;
mod notifications;
mod odds_chart;
mod position_list;
mod status_bar;
mod volume_chart;

pub use bet_panel::BetPanel;
pub use cards::{KpiRow, OddsCards};
pub use help::HelpPanel;
pub use notifications::render_notification;
pub use odds_chart::OddsChartWidget;
pub use position_list::PositionList;
pub use status_bar::StatusBar;
pub use volume_chart::VolumeChartWidget;
