//! Event stream between the engine and the dashboard.
//!
//! This module provides the bounded, ordered channel that carries
//! human-readable forensics lines from producers (honeypot sessions, the
//! whitelist sweeper, the telemetry aggregator) to the single dashboard
//! consumer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Sessions   │──┐
//! └──────────────┘  │   EventBus (bounded, FIFO)    ┌──────────────┐
//! ┌──────────────┐  ├──────────────────────────────►│  Dashboard   │
//! │  Aggregator  │──┤                               └──────────────┘
//! └──────────────┘  │
//! ┌──────────────┐  │
//! │   Sweeper    │──┘
//! └──────────────┘
//! ```
//!
//! The bus is constructed once by the orchestrator and cloned into every
//! producer; there is no ambient global channel. If producers outpace the
//! consumer the channel fills and `send` suspends until a slot frees up.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

/// Capacity of the event stream. Producers stall when it is full.
pub const EVENT_STREAM_CAPACITY: usize = 100;

/// Category of a forensics event, shown as the bracketed tag in the log view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Engine lifecycle and housekeeping.
    System,
    /// A new connection reached a decoy service.
    Trap,
    /// An attacker-submitted command inside a session.
    Command,
    /// Egress data-loss-prevention block report.
    Dlp,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::System => write!(f, "SYSTEM"),
            EventCategory::Trap => write!(f, "TRAP"),
            EventCategory::Command => write!(f, "COMMAND"),
            EventCategory::Dlp => write!(f, "DLP"),
        }
    }
}

/// One display line for the dashboard log view.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,
    /// Event category.
    pub category: EventCategory,
    /// The message body.
    pub message: String,
}

impl LogEvent {
    /// Build an event stamped with the current time.
    pub fn now(category: EventCategory, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            category,
            message: message.into(),
        }
    }

    /// The line as shown in the log view, without the timestamp column.
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.category, self.message)
    }
}

/// Producer handle for the event stream.
///
/// Cheap to clone; every producer gets its own copy.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::Sender<LogEvent>,
}

/// Consumer handle for the event stream. There is exactly one.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::Receiver<LogEvent>,
}

/// Create a connected bus/stream pair with the default capacity.
pub fn event_channel() -> (EventBus, EventStream) {
    event_channel_with_capacity(EVENT_STREAM_CAPACITY)
}

/// Create a connected bus/stream pair with a custom capacity.
pub fn event_channel_with_capacity(capacity: usize) -> (EventBus, EventStream) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventBus { tx }, EventStream { rx })
}

impl EventBus {
    /// Emit an event, waiting if the stream is full.
    ///
    /// Returns `Err` with the event if the consumer has gone away.
    pub async fn emit(&self, category: EventCategory, message: impl Into<String>) -> Result<(), LogEvent> {
        self.send(LogEvent::now(category, message)).await
    }

    /// Send a pre-built event, waiting if the stream is full.
    pub async fn send(&self, event: LogEvent) -> Result<(), LogEvent> {
        self.tx.send(event).await.map_err(|e| e.0)
    }
}

impl EventStream {
    /// Receive the next event, waiting until one is available.
    ///
    /// Returns `None` once every producer has been dropped.
    pub async fn recv(&mut self) -> Option<LogEvent> {
        self.rx.recv().await
    }

    /// Take the next event without blocking, if one is queued.
    pub fn try_recv(&mut self) -> Option<LogEvent> {
        self.rx.try_recv().ok()
    }
}
