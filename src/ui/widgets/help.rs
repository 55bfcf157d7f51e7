//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    const SECTIONS: [(&'static str, &'static [(&'static str, &'static str)]); 2] = [
        (
            "Dashboard",
            &[
                ("s    ", "Enter a YES (robot finishes) bet"),
                ("f    ", "Enter a NO (robot fails) bet"),
                ("r    ", "Refresh market and balance"),
                ("Esc  ", "Dismiss notification"),
                ("?    ", "Toggle help"),
                ("q    ", "Quit"),
            ],
        ),
        (
            "Bet input",
            &[
                ("0-9 .", "Type amount"),
                ("Tab  ", "Switch between YES and NO"),
                ("Enter", "Place bet"),
                ("Esc  ", "Leave input"),
            ],
        ),
    ];

    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 60, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let mut help_text = Vec::new();
        for (heading, keys) in Self::SECTIONS {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(Span::styled(
                heading,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            help_text.push(Line::from(""));
            for (key, description) in keys {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {}  ", key), Style::default().fg(Color::Cyan)),
                    Span::raw(*description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
