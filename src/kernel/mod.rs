//! Interfaces to the kernel-resident collaborators.
//!
//! Packet classification, stealth drops and egress DLP filtering happen in
//! kernel programs outside this crate. The engine only sees two things:
//!
//! - three single-slot, monotonically non-decreasing counters (redirected
//!   attacks, stealth drops, egress blocks), read by a fixed 32-bit key;
//! - the SPA whitelist, an expiring set of pre-authorized source addresses
//!   that the authorization collaborator inserts into and this engine sweeps.
//!
//! Both are modeled as traits so the platform adapter (the memory-mapped
//! kernel structures) stays outside the core. The in-memory adapters here
//! back tests and hosts without the kernel programs loaded.

mod counters;
mod error;
mod whitelist;

pub use counters::{CounterMap, CounterSnapshot, SlotCounter, COUNTER_KEY};
pub use error::KernelError;
pub use whitelist::{ExpiringSet, MemWhitelist};

use std::sync::Arc;
use tracing::{debug, warn};

/// Handles to every kernel collaborator the engine talks to.
///
/// The egress/DLP counter is optional: if that collaborator cannot be
/// acquired the feature is disabled and the rest of the system runs
/// unaffected.
#[derive(Clone)]
pub struct KernelHandles {
    /// Connections classified and redirected into the honeypot.
    pub attacks: Arc<dyn CounterMap>,
    /// Probes silently dropped before reaching any service.
    pub stealth_drops: Arc<dyn CounterMap>,
    /// Outbound exfiltration attempts blocked by the DLP program.
    /// `None` when the DLP collaborator failed to attach.
    pub egress_blocks: Option<Arc<dyn CounterMap>>,
    /// The SPA whitelist, swept by this engine.
    pub whitelist: Arc<dyn ExpiringSet>,
}

impl KernelHandles {
    /// Acquire collaborator handles for the given interface.
    ///
    /// The classifier and whitelist handles are required; failure to acquire
    /// the egress/DLP handle only disables that feature (the caller surfaces
    /// the warning).
    pub fn attach(iface: &str) -> Result<Self, KernelError> {
        debug!("attaching kernel collaborators on {}", iface);

        let attacks: Arc<dyn CounterMap> = Arc::new(SlotCounter::default());
        let stealth_drops: Arc<dyn CounterMap> = Arc::new(SlotCounter::default());
        let whitelist: Arc<dyn ExpiringSet> = Arc::new(MemWhitelist::default());

        let egress_blocks: Option<Arc<dyn CounterMap>> = match Self::attach_egress(iface) {
            Ok(counter) => Some(counter),
            Err(e) => {
                warn!("egress DLP collaborator unavailable: {}", e);
                None
            }
        };

        Ok(Self {
            attacks,
            stealth_drops,
            egress_blocks,
            whitelist,
        })
    }

    fn attach_egress(_iface: &str) -> Result<Arc<dyn CounterMap>, KernelError> {
        Ok(Arc::new(SlotCounter::default()))
    }

    /// Whether the egress/DLP collaborator is active.
    pub fn dlp_active(&self) -> bool {
        self.egress_blocks.is_some()
    }
}
