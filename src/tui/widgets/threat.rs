//! Threat gauge widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Widget},
};

/// Bounded [0, 100) threat score bar.
pub struct ThreatGauge {
    percent: u8,
}

impl ThreatGauge {
    /// Create the gauge for the current score.
    pub fn new(percent: u8) -> Self {
        // The aggregator already bounds the score; clamp anyway so a bad
        // value cannot panic the renderer.
        Self {
            percent: percent.min(99),
        }
    }
}

impl Widget for ThreatGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Gauge::default()
            .block(Block::default().title(" THREAT LEVEL ").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Red))
            .percent(u16::from(self.percent))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_clamps() {
        assert_eq!(ThreatGauge::new(255).percent, 99);
        assert_eq!(ThreatGauge::new(20).percent, 20);
    }

    #[test]
    fn test_gauge_renders_title() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 3));
        ThreatGauge::new(42).render(buf.area, &mut buf);

        let content: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("THREAT LEVEL"));
        assert!(content.contains("42"));
    }
}
