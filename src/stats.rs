//! Telemetry aggregation: kernel counters in, threat score out.
//!
//! Once a second the aggregator reads the three collaborator counters,
//! derives the threat gauge, and publishes the result for the dashboard.
//! This is the single authority for the gauge; nothing else computes one.
//!
//! DLP block reports are edge-triggered: a `[DLP]` event is emitted only
//! when the egress counter has increased since the previous tick, carrying
//! the raw value read that tick.

use crate::events::{EventBus, EventCategory};
use crate::kernel::{CounterMap, CounterSnapshot, KernelHandles, COUNTER_KEY};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::trace;

/// How often counters are polled.
pub const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// Latest counter snapshot plus the derived threat gauge, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreatStats {
    /// Raw counter values this tick.
    pub counters: CounterSnapshot,
    /// Derived threat score, always in `[0, 100)`.
    pub gauge: u8,
}

/// Derive the threat gauge from the attack counter.
pub fn threat_gauge(attacks: u64) -> u8 {
    ((attacks * 2) % 100) as u8
}

/// The counter-polling loop.
pub struct TelemetryAggregator {
    attacks: Arc<dyn CounterMap>,
    stealth_drops: Arc<dyn CounterMap>,
    egress_blocks: Option<Arc<dyn CounterMap>>,
    bus: EventBus,
    stats_tx: watch::Sender<ThreatStats>,
    last_egress: u64,
    period: Duration,
}

impl TelemetryAggregator {
    /// Create an aggregator over the kernel handles.
    ///
    /// Returns the aggregator and the receiver the dashboard watches.
    pub fn new(handles: &KernelHandles, bus: EventBus) -> (Self, watch::Receiver<ThreatStats>) {
        Self::with_period(handles, bus, STATS_INTERVAL)
    }

    /// Create an aggregator with a custom poll period (tests).
    pub fn with_period(
        handles: &KernelHandles,
        bus: EventBus,
        period: Duration,
    ) -> (Self, watch::Receiver<ThreatStats>) {
        let (stats_tx, stats_rx) = watch::channel(ThreatStats::default());
        (
            Self {
                attacks: handles.attacks.clone(),
                stealth_drops: handles.stealth_drops.clone(),
                egress_blocks: handles.egress_blocks.clone(),
                bus,
                stats_tx,
                last_egress: 0,
                period,
            },
            stats_rx,
        )
    }

    /// Run the poll loop. Never returns; ends with the process.
    pub async fn run(mut self) {
        let mut ticker = interval(self.period);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Read the counters once, publish stats, and report new DLP blocks.
    pub async fn poll_once(&mut self) {
        let attacks = self.read(&self.attacks);
        let stealth_drops = self.read(&self.stealth_drops);
        let egress_blocks = self.egress_blocks.as_ref().map(|map| self.read(map));

        if let Some(blocked) = egress_blocks {
            if blocked > self.last_egress {
                let _ = self
                    .bus
                    .emit(
                        EventCategory::Dlp,
                        format!("Blocked {} data exfiltration attempts", blocked),
                    )
                    .await;
            }
            self.last_egress = blocked;
        }

        let stats = ThreatStats {
            counters: CounterSnapshot {
                attacks,
                stealth_drops,
                egress_blocks,
            },
            gauge: threat_gauge(attacks),
        };
        let _ = self.stats_tx.send(stats);
    }

    fn read(&self, map: &Arc<dyn CounterMap>) -> u64 {
        match map.get(COUNTER_KEY) {
            Ok(value) => value,
            Err(e) => {
                trace!("counter read failed: {}", e);
                0
            }
        }
    }
}
