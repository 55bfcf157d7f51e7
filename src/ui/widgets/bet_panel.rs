//! Bet amount inputs.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{BetPosition, Store};

/// The YES and NO amount inputs side by side.
pub struct BetPanel;

impl BetPanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Self::render_input(frame, chunks[0], store, BetPosition::Success, Color::Green);
        Self::render_input(frame, chunks[1], store, BetPosition::Fail, Color::Red);
    }

    fn render_input(
        frame: &mut Frame,
        area: Rect,
        store: &Store,
        position: BetPosition,
        color: Color,
    ) {
        let form = &store.dashboard.bet_form;
        let focused = store.app.focused_position() == Some(position);
        let enabled = form.controls_enabled();

        let border_style = match (enabled, focused) {
            (false, _) => Style::default().fg(Color::DarkGray),
            (true, true) => Style::default().fg(color).add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Gray),
        };

        let text = form.input(position);
        let mut spans = vec![Span::styled("$ ", Style::default().fg(Color::DarkGray))];
        if text.is_empty() && !focused {
            spans.push(Span::styled(
                "amount",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::raw(text.to_string()));
        }
        if focused && enabled {
            spans.push(Span::styled(
                "_",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let key_hint = match position {
            BetPosition::Success => "s",
            BetPosition::Fail => "f",
        };
        let title = if enabled {
            format!(" Bet {} [{}] ", position.outcome_label(), key_hint)
        } else {
            format!(" Bet {} (submitting...) ", position.outcome_label())
        };

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );

        frame.render_widget(paragraph, area);
    }
}
