//! Forensics log view widget.

use crate::events::{EventCategory, LogEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};
use std::collections::VecDeque;

/// Rolling log view, scrolled to the newest entry.
pub struct LogsWidget<'a> {
    rows: &'a VecDeque<LogEvent>,
    event_count: u64,
}

impl<'a> LogsWidget<'a> {
    /// Create the log view over the app's rows.
    pub fn new(rows: &'a VecDeque<LogEvent>, event_count: u64) -> Self {
        Self { rows, event_count }
    }

    fn category_color(category: EventCategory) -> Color {
        match category {
            EventCategory::System => Color::Cyan,
            EventCategory::Trap => Color::Green,
            EventCategory::Command => Color::Yellow,
            EventCategory::Dlp => Color::Magenta,
        }
    }
}

impl Widget for LogsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Stay scrolled to the newest entry: drop rows that no longer fit
        // above it.
        let capacity = area.height.saturating_sub(2) as usize;
        let skip = self.rows.len().saturating_sub(capacity);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .skip(skip)
            .map(|event| {
                let line = Line::from(vec![
                    Span::styled(
                        event.timestamp.format("%H:%M:%S").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        event.display_line(),
                        Style::default().fg(Self::category_color(event.category)),
                    ),
                ]);
                ListItem::new(line)
            })
            .collect();

        let block = Block::default()
            .title(format!(" [ REAL-TIME FORENSICS ] ({}) ", self.event_count))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        List::new(items).block(block).render(area, buf);
    }
}
