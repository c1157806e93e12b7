//! Terminal dashboard for live threat telemetry.
//!
//! A single-threaded cooperative loop renders the engine's state and is the
//! sole consumer of the event stream.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          PHANTOM GRID - ACTIVE DEFENSE SYSTEM               │
//! ├───────────────────────────────┬──────────────┬──────────────┤
//! │                               │         THREAT LEVEL        │
//! │                               ├─────────────────────────────┤
//! │     [ REAL-TIME FORENSICS ]   │       PATTERN ANALYSIS      │
//! │     rolling 16-row log view   ├─────────────────────────────┤
//! │                               │          REDIRECTED         │
//! │                               ├──────────────┬──────────────┤
//! │                               │ STEALTH DROPS│ EGRESS (DLP) │
//! └───────────────────────────────┴──────────────┴──────────────┘
//! ```

pub mod app;
pub mod input;
pub mod layout;
pub mod runner;
pub mod widgets;

pub use app::{DashboardApp, MAX_LOG_ROWS};
pub use input::{handle_event, InputResult};
pub use layout::DashboardLayout;
pub use runner::{DashboardRunner, RENDER_TICK};
