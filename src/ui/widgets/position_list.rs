//! Placed bets table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::dashboard::format_currency;
use crate::state::{BetPosition, PlacedBet, Store};

/// Position list widget.
pub struct PositionList;

impl PositionList {
    /// Render the position list, newest bet first.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let portfolio = &store.portfolio;

        let header_cells = ["Time", "Outcome", "Amount", "Status"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1);

        let rows = portfolio.newest_first().map(position_row);

        let title = match portfolio.last_reconciled {
            Some(at) => format!(
                " Bets ({}) | YES {} | NO {} | synced {} ",
                portfolio.positions.len(),
                format_currency(portfolio.staked_on(BetPosition::Success)),
                format_currency(portfolio.staked_on(BetPosition::Fail)),
                at.format("%I:%M:%S %p"),
            ),
            None => " Bets ".to_string(),
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(14),
                Constraint::Min(8),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(table, area);
    }
}

fn position_row(bet: &PlacedBet) -> Row<'static> {
    let outcome_style = match bet.position {
        BetPosition::Success => Style::default().fg(Color::Green),
        BetPosition::Fail => Style::default().fg(Color::Red),
    };

    let time = bet
        .timestamp
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|| "-".to_string());

    Row::new(vec![
        Cell::from(time),
        Cell::from(bet.position.outcome_label()).style(outcome_style),
        Cell::from(format_currency(bet.amount)),
        Cell::from(bet.status.clone()),
    ])
}
