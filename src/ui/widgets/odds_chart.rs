//! Odds bar chart.

use ratatui::{
    Frame,
    layout::{Direction, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
};

use crate::dashboard::{OddsChart, format_odds};

/// Horizontal bars for the YES and NO implied probabilities.
pub struct OddsChartWidget;

impl OddsChartWidget {
    pub fn render(frame: &mut Frame, area: Rect, chart: &OddsChart) {
        let [success, fail] = chart.data;
        let bars = [
            Self::bar("YES", success, Color::Green),
            Self::bar("NO", fail, Color::Red),
        ];

        let widget = BarChart::default()
            .block(
                Block::default()
                    .title(" Odds ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
            .max(100)
            .data(BarGroup::default().bars(&bars));

        frame.render_widget(widget, area);
    }

    fn bar(label: &'static str, odds: f64, color: Color) -> Bar<'static> {
        Bar::default()
            .label(Line::from(label))
            .value(odds.clamp(0.0, 100.0).round() as u64)
            .text_value(format_odds(odds))
            .style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color))
    }
}
