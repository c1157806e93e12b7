//! Read-only counter maps exposed by the kernel collaborators.

use super::error::KernelError;
use std::sync::atomic::{AtomicU64, Ordering};

/// The fixed key all single-slot counters are stored under.
pub const COUNTER_KEY: u32 = 0;

/// A read-only, single-slot 64-bit counter map.
///
/// The engine never writes these values; the kernel programs increment them
/// and this side only observes. Values are monotonically non-decreasing.
pub trait CounterMap: Send + Sync {
    /// Read the counter stored at `key`.
    fn get(&self, key: u32) -> Result<u64, KernelError>;
}

/// Snapshot of all three counters taken in one aggregator tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Connections redirected into the honeypot.
    pub attacks: u64,
    /// Probes dropped without a response.
    pub stealth_drops: u64,
    /// Exfiltration attempts blocked on egress. `None` while DLP is disabled.
    pub egress_blocks: Option<u64>,
}

/// In-memory single-slot counter.
///
/// Stands in for the kernel map on hosts without the classifier loaded, and
/// doubles as the test fixture. The write side exists so the simulated
/// collaborator can advance the value; the engine itself only calls `get`.
#[derive(Debug, Default)]
pub struct SlotCounter {
    slot: AtomicU64,
}

impl SlotCounter {
    /// Create a counter starting at `value`.
    pub fn with_value(value: u64) -> Self {
        Self {
            slot: AtomicU64::new(value),
        }
    }

    /// Advance the slot. Collaborator-side operation, not used by the engine.
    pub fn add(&self, delta: u64) {
        self.slot.fetch_add(delta, Ordering::Relaxed);
    }
}

impl CounterMap for SlotCounter {
    fn get(&self, key: u32) -> Result<u64, KernelError> {
        if key != COUNTER_KEY {
            return Err(KernelError::UnknownKey(key));
        }
        Ok(self.slot.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_at_zero() {
        let counter = SlotCounter::default();
        assert_eq!(counter.get(COUNTER_KEY).unwrap(), 0);
    }

    #[test]
    fn test_slot_accumulates() {
        let counter = SlotCounter::with_value(10);
        counter.add(5);
        assert_eq!(counter.get(COUNTER_KEY).unwrap(), 15);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let counter = SlotCounter::default();
        assert!(matches!(counter.get(1), Err(KernelError::UnknownKey(1))));
    }
}
