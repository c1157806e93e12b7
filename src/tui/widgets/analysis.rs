//! Pattern analysis panel widget.
//!
//! Idle until the first attacker command arrives, then shows the canned
//! pattern verdict for the most recent one.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The analysis panel.
pub struct AnalysisWidget<'a> {
    last_command: Option<&'a str>,
}

impl<'a> AnalysisWidget<'a> {
    /// Create the panel for the most recent attacker command.
    pub fn new(last_command: Option<&'a str>) -> Self {
        Self { last_command }
    }
}

impl Widget for AnalysisWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = match self.last_command {
            None => vec![Line::from(Span::styled(
                "Waiting for traffic...",
                Style::default().fg(Color::White),
            ))],
            Some(command) => vec![
                Line::from(Span::styled(
                    "ANALYZING PATTERN...",
                    Style::default().fg(Color::White),
                )),
                Line::from(vec![
                    Span::styled("PREDICTION", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                    Span::raw(": APT attack in progress"),
                ]),
                Line::from(vec![
                    Span::styled("LAST CMD", Style::default().fg(Color::Yellow)),
                    Span::raw(format!(": {}", command)),
                ]),
            ],
        };

        Paragraph::new(lines)
            .block(Block::default().title(" PATTERN ANALYSIS ").borders(Borders::ALL))
            .render(area, buf);
    }
}
