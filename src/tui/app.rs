//! Dashboard application state.
//!
//! `DashboardApp` owns everything the renderer draws: the rolling forensics
//! view, the latest published threat stats, and the pattern-analysis panel
//! state. It is mutated only by the render loop.

use crate::events::{EventCategory, EventStream, LogEvent};
use crate::stats::ThreatStats;
use std::collections::VecDeque;
use tokio::sync::watch;

/// Maximum rows visible in the forensics log view.
pub const MAX_LOG_ROWS: usize = 16;

/// The dashboard state machine: `Running` until quit, then `Terminated`.
pub struct DashboardApp {
    /// Sole consumer end of the event stream.
    events: EventStream,
    /// Latest stats published by the telemetry aggregator.
    stats_rx: watch::Receiver<ThreatStats>,
    /// Rolling log view, oldest first.
    rows: VecDeque<LogEvent>,
    /// Cached copy of the latest stats.
    stats: ThreatStats,
    /// Total events consumed over the dashboard's lifetime.
    event_count: u64,
    /// Last attacker command, feeding the pattern-analysis panel.
    last_command: Option<String>,
    /// Interface shown in the header.
    iface: String,
    /// Whether the egress DLP collaborator is active.
    dlp_active: bool,
    /// Set once the quit key is seen.
    should_quit: bool,
}

impl DashboardApp {
    /// Create the dashboard state.
    pub fn new(
        iface: impl Into<String>,
        dlp_active: bool,
        events: EventStream,
        stats_rx: watch::Receiver<ThreatStats>,
    ) -> Self {
        Self {
            events,
            stats_rx,
            rows: VecDeque::with_capacity(MAX_LOG_ROWS),
            stats: ThreatStats::default(),
            event_count: 0,
            last_command: None,
            iface: iface.into(),
            dlp_active,
            should_quit: false,
        }
    }

    /// The visible log rows, oldest first.
    #[must_use]
    pub fn rows(&self) -> &VecDeque<LogEvent> {
        &self.rows
    }

    /// The latest threat stats.
    #[must_use]
    pub fn stats(&self) -> ThreatStats {
        self.stats
    }

    /// Total events consumed.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Last attacker command, if any.
    #[must_use]
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    /// Interface shown in the header.
    #[must_use]
    pub fn iface(&self) -> &str {
        &self.iface
    }

    /// Whether DLP is active.
    #[must_use]
    pub fn dlp_active(&self) -> bool {
        self.dlp_active
    }

    /// Whether the quit key has been seen.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Mark the dashboard terminated.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Consume one queued event if present. Returns whether one was taken.
    pub fn try_process_event(&mut self) -> bool {
        match self.events.try_recv() {
            Some(event) => {
                self.append_row(event);
                true
            }
            None => false,
        }
    }

    /// Pick up a newly published stats value, if any.
    pub fn refresh_stats(&mut self) {
        if self.stats_rx.has_changed().unwrap_or(false) {
            self.stats = *self.stats_rx.borrow_and_update();
        }
    }

    /// Append a row to the log view, evicting the oldest past the cap.
    fn append_row(&mut self, event: LogEvent) {
        if event.category == EventCategory::Command {
            self.last_command = Some(event.message.clone());
        }

        self.rows.push_back(event);
        while self.rows.len() > MAX_LOG_ROWS {
            self.rows.pop_front();
        }
        self.event_count += 1;
    }
}
