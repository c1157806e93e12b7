//! phantom-grid: active defense honeypot with live threat telemetry.
//!
//! The kernel-resident classifiers redirect suspect connections into this
//! engine's decoy services, silently drop what they can, and filter egress
//! for exfiltration. This crate is everything above the kernel:
//!
//! - **Decoy**: fake service identities and the attacker interaction loop
//! - **Audit**: append-only JSON forensics log of every interaction
//! - **Sweep**: periodic eviction of expired SPA whitelist entries
//! - **Stats**: counter polling and the derived threat gauge
//! - **Events**: the bounded stream feeding the dashboard
//! - **TUI**: the live forensics dashboard
//!
//! # Security Model
//!
//! Decoys never execute anything an attacker sends. Every interaction is
//! recorded; the worst an attacker can do to the engine itself is hold one
//! of a bounded number of session slots open.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod audit;
pub mod cli;
pub mod config;
pub mod decoy;
pub mod events;
pub mod kernel;
pub mod orchestrator;
pub mod stats;
pub mod sweep;
pub mod tui;
