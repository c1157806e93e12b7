//! Counter box widget, shared by all three kernel counters.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// A titled box showing one counter value.
pub struct CounterBox<'a> {
    title: &'a str,
    /// `None` renders as `OFF` (collaborator unavailable).
    value: Option<u64>,
    color: Color,
}

impl<'a> CounterBox<'a> {
    /// Redirected-connections box.
    pub fn redirected(value: u64) -> Self {
        Self {
            title: " REDIRECTED ",
            value: Some(value),
            color: Color::Yellow,
        }
    }

    /// Stealth-drop box.
    pub fn stealth_drops(value: u64) -> Self {
        Self {
            title: " STEALTH DROPS ",
            value: Some(value),
            color: Color::Red,
        }
    }

    /// Egress-block box; `None` while DLP is disabled.
    pub fn egress_blocks(value: Option<u64>) -> Self {
        Self {
            title: " EGRESS BLOCKS (DLP) ",
            value,
            color: Color::Magenta,
        }
    }
}

impl Widget for CounterBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = match self.value {
            Some(value) => value.to_string(),
            None => "OFF".to_string(),
        };

        Paragraph::new(format!("\n{}", text))
            .style(Style::default().fg(self.color))
            .alignment(Alignment::Center)
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_value() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 4));
        CounterBox::redirected(42).render(buf.area, &mut buf);

        let content: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("REDIRECTED"));
        assert!(content.contains("42"));
    }

    #[test]
    fn test_disabled_dlp_shows_off() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 4));
        CounterBox::egress_blocks(None).render(buf.area, &mut buf);

        let content: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("OFF"));
    }
}
