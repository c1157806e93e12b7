//! Top banner widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Banner showing engine status, interface and trap mode.
pub struct HeaderWidget<'a> {
    iface: &'a str,
    dlp_active: bool,
}

impl<'a> HeaderWidget<'a> {
    /// Create the header for the given interface.
    pub fn new(iface: &'a str, dlp_active: bool) -> Self {
        Self { iface, dlp_active }
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = if self.dlp_active {
            "KERNEL TRAP + DLP"
        } else {
            "KERNEL TRAP"
        };

        let line = Line::from(vec![
            Span::raw("STATUS: "),
            Span::styled("ACTIVE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" | INTERFACE: "),
            Span::styled(self.iface, Style::default().fg(Color::Yellow)),
            Span::raw(" | MODE: "),
            Span::styled(mode, Style::default().fg(Color::Red)),
        ]);

        let block = Block::default()
            .title(" PHANTOM GRID - ACTIVE DEFENSE SYSTEM ")
            .borders(Borders::ALL);

        Paragraph::new(line)
            .style(Style::default().fg(Color::Cyan))
            .block(block)
            .render(area, buf);
    }
}
