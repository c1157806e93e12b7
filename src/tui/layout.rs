//! Dashboard layout definitions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed panel areas for one frame.
#[derive(Debug, Clone)]
pub struct DashboardLayout {
    /// Banner across the top.
    pub header: Rect,
    /// Forensics log view.
    pub logs: Rect,
    /// Threat gauge.
    pub gauge: Rect,
    /// Pattern analysis panel.
    pub analysis: Rect,
    /// Redirected-connections counter.
    pub redirected: Rect,
    /// Stealth-drop counter.
    pub stealth: Rect,
    /// Egress-block counter.
    pub egress: Rect,
}

impl DashboardLayout {
    /// Compute the layout for a given terminal area.
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // Body
            ])
            .split(area);

        let header = vertical[0];
        let body = vertical[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Logs
                Constraint::Percentage(40), // Telemetry column
            ])
            .split(body);

        let logs = columns[0];

        let telemetry = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Gauge
                Constraint::Min(4),    // Analysis
                Constraint::Length(4), // Redirected
                Constraint::Length(4), // Stealth / egress
            ])
            .split(columns[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(telemetry[3]);

        Self {
            header,
            logs,
            gauge: telemetry[0],
            analysis: telemetry[1],
            redirected: telemetry[2],
            stealth: bottom[0],
            egress: bottom[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_positions() {
        let layout = DashboardLayout::compute(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.header.height, 3);
        assert!(layout.logs.y >= layout.header.height);
        assert_eq!(layout.logs.y, layout.gauge.y);
        assert!(layout.analysis.y > layout.gauge.y);
        assert!(layout.redirected.y > layout.analysis.y);
        assert_eq!(layout.stealth.y, layout.egress.y);
        assert!(layout.egress.x > layout.stealth.x);
    }

    #[test]
    fn test_layout_widths() {
        let layout = DashboardLayout::compute(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.header.width, 100);
        assert_eq!(layout.logs.width, 60);
        assert_eq!(layout.gauge.width, 40);
    }
}
