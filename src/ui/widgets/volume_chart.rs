//! Volume trend line chart.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::dashboard::TrendChart;

/// Line chart of the YES and NO pools over the retained samples.
pub struct VolumeChartWidget;

impl VolumeChartWidget {
    pub fn render(frame: &mut Frame, area: Rect, chart: &TrendChart) {
        let success = points(&chart.success);
        let fail = points(&chart.fail);

        let datasets = vec![
            Dataset::default()
                .name("YES")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&success),
            Dataset::default()
                .name("NO")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&fail),
        ];

        let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;
        let x_labels: Vec<Span> = match (chart.labels.first(), chart.labels.last()) {
            (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
            _ => Vec::new(),
        };

        let y_max = y_bound(chart.max_value());
        let y_labels = vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", y_max / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ];

        let widget = Chart::new(datasets)
            .block(
                Block::default()
                    .title(" Volume Trend ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(widget, area);
    }
}

/// Index each value along the x axis.
fn points(series: &[f64]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

/// Upper y bound with some headroom; never zero.
fn y_bound(max: f64) -> f64 {
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_are_indexed() {
        assert_eq!(points(&[5.0, 7.5]), vec![(0.0, 5.0), (1.0, 7.5)]);
        assert!(points(&[]).is_empty());
    }

    #[test]
    fn test_y_bound_has_headroom() {
        assert_eq!(y_bound(0.0), 1.0);
        assert!(y_bound(100.0) > 100.0);
    }
}
