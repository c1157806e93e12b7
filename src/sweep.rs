//! Periodic eviction of expired SPA whitelist entries.
//!
//! The authorization collaborator inserts sources with a TTL; this loop is
//! the only thing that ever removes them. A tick that finds nothing expired
//! has no observable side effect.

use crate::events::{EventBus, EventCategory};
use crate::kernel::ExpiringSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::debug;

/// How often the whitelist is swept.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// The whitelist sweep loop.
pub struct WhitelistSweeper {
    whitelist: Arc<dyn ExpiringSet>,
    bus: EventBus,
    period: Duration,
}

impl WhitelistSweeper {
    /// Create a sweeper over the shared whitelist.
    pub fn new(whitelist: Arc<dyn ExpiringSet>, bus: EventBus) -> Self {
        Self::with_period(whitelist, bus, SWEEP_INTERVAL)
    }

    /// Create a sweeper with a custom period (tests).
    pub fn with_period(whitelist: Arc<dyn ExpiringSet>, bus: EventBus, period: Duration) -> Self {
        Self {
            whitelist,
            bus,
            period,
        }
    }

    /// Run the sweep loop. Never returns; ends with the process.
    pub async fn run(self) {
        let mut ticker = interval(self.period);
        loop {
            ticker.tick().await;
            self.sweep_once(Instant::now()).await;
        }
    }

    /// Perform one sweep as of `now`.
    pub async fn sweep_once(&self, now: Instant) {
        let removed = self.whitelist.remove_expired(now);
        if removed > 0 {
            debug!("swept {} expired whitelist entries", removed);
            let noun = if removed == 1 { "entry" } else { "entries" };
            let _ = self
                .bus
                .emit(
                    EventCategory::System,
                    format!("SPA whitelist: expired {} {}", removed, noun),
                )
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_channel_with_capacity;
    use crate::kernel::MemWhitelist;
    use std::net::IpAddr;

    fn addr(last: u8) -> IpAddr {
        IpAddr::from([198, 51, 100, last])
    }

    #[tokio::test]
    async fn test_sweep_removes_only_elapsed() {
        let whitelist = Arc::new(MemWhitelist::default());
        let (bus, mut events) = event_channel_with_capacity(8);
        let sweeper = WhitelistSweeper::new(whitelist.clone(), bus);

        whitelist.insert(addr(1), Duration::from_secs(1));
        whitelist.insert(addr(2), Duration::from_secs(600));

        sweeper.sweep_once(Instant::now() + SWEEP_INTERVAL).await;

        assert!(!whitelist.contains(&addr(1)));
        assert!(whitelist.contains(&addr(2)));

        let event = events.recv().await.unwrap();
        assert_eq!(event.category, EventCategory::System);
        assert!(event.message.contains("expired 1 entry"));
    }

    #[tokio::test]
    async fn test_empty_sweep_emits_nothing() {
        let whitelist = Arc::new(MemWhitelist::default());
        let (bus, mut events) = event_channel_with_capacity(8);
        let sweeper = WhitelistSweeper::new(whitelist.clone(), bus);

        whitelist.insert(addr(3), Duration::from_secs(600));
        sweeper.sweep_once(Instant::now()).await;

        assert!(events.try_recv().is_none());
        assert!(whitelist.contains(&addr(3)));
    }

    #[tokio::test]
    async fn test_interval_loop_evicts() {
        let whitelist = Arc::new(MemWhitelist::default());
        let (bus, _events) = event_channel_with_capacity(8);
        let sweeper =
            WhitelistSweeper::with_period(whitelist.clone(), bus, Duration::from_millis(20));

        whitelist.insert(addr(4), Duration::from_millis(1));
        tokio::spawn(sweeper.run());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(!whitelist.contains(&addr(4)));
    }
}
