//! Value cards that read straight from the display surfaces.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::dashboard::{SurfaceId, SurfaceRegistry};

/// A single titled card.
struct Card {
    title: &'static str,
    surface: SurfaceId,
    color: Color,
}

impl Card {
    const fn new(title: &'static str, surface: SurfaceId, color: Color) -> Self {
        Self {
            title,
            surface,
            color,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, surfaces: &SurfaceRegistry) {
        // Empty surfaces show a dash until the first poll lands.
        let value = surfaces
            .text(self.surface)
            .filter(|v| !v.is_empty())
            .unwrap_or("-");

        let paragraph = Paragraph::new(value.to_string())
            .style(
                Style::default()
                    .fg(self.color)
                    .add_modifier(Modifier::BOLD),
            )
            .centered()
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );

        frame.render_widget(paragraph, area);
    }
}

fn render_row(frame: &mut Frame, area: Rect, surfaces: &SurfaceRegistry, cards: &[Card]) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, cards.len() as u32)))
        .split(area);

    // Unmounted surfaces get no card.
    for (card, area) in cards.iter().zip(chunks.iter()) {
        if surfaces.is_mounted(card.surface) {
            card.render(frame, *area, surfaces);
        }
    }
}

/// Race status, timer, score, totals and the user's balance.
pub struct KpiRow;

impl KpiRow {
    const CARDS: [Card; 6] = [
        Card::new("Robot", SurfaceId::RobotStatus, Color::Cyan),
        Card::new("Time", SurfaceId::RaceTimer, Color::White),
        Card::new("Score", SurfaceId::RaceScore, Color::White),
        Card::new("Volume", SurfaceId::TotalVolume, Color::Yellow),
        Card::new("Bettors", SurfaceId::ParticipantCount, Color::White),
        Card::new("Balance", SurfaceId::UserBalance, Color::Magenta),
    ];

    pub fn render(frame: &mut Frame, area: Rect, surfaces: &SurfaceRegistry) {
        render_row(frame, area, surfaces, &Self::CARDS);
    }
}

/// Odds and pool size for both sides of the market.
pub struct OddsCards;

impl OddsCards {
    const ODDS: [Card; 2] = [
        Card::new("YES odds", SurfaceId::SuccessOdds, Color::Green),
        Card::new("NO odds", SurfaceId::FailOdds, Color::Red),
    ];

    const POOLS: [Card; 2] = [
        Card::new("YES pool", SurfaceId::SuccessPool, Color::Green),
        Card::new("NO pool", SurfaceId::FailPool, Color::Red),
    ];

    pub fn render(frame: &mut Frame, area: Rect, surfaces: &SurfaceRegistry) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(area);

        render_row(frame, rows[0], surfaces, &Self::ODDS);
        render_row(frame, rows[1], surfaces, &Self::POOLS);
    }
}
