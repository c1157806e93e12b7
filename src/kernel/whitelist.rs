//! The SPA whitelist: an expiring set of pre-authorized sources.
//!
//! Sources that complete the single-packet-authorization handshake are
//! inserted by the authorization collaborator with a TTL; this engine only
//! removes entries whose expiry has elapsed. Removal is performed one entry
//! at a time so insertions racing with a sweep are never blocked for the
//! duration of the whole pass.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

/// A keyed expiring set of authorized source addresses.
///
/// `insert` belongs to the authorization collaborator (and tests); the
/// engine's sweep loop only calls `remove_expired`.
pub trait ExpiringSet: Send + Sync {
    /// Authorize `source` for `ttl` from now. Re-insertion refreshes the expiry.
    fn insert(&self, source: IpAddr, ttl: Duration);

    /// Remove every entry whose expiry has elapsed as of `now`.
    ///
    /// Entries not yet expired are left untouched. Returns the number of
    /// entries removed.
    fn remove_expired(&self, now: Instant) -> usize;

    /// Whether `source` is currently authorized.
    fn contains(&self, source: &IpAddr) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Whether the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory whitelist adapter.
///
/// Mirrors the kernel map's iterate-then-delete sweep: expired keys are
/// collected under the read lock, then each is re-checked and removed under a
/// short per-entry write lock, so a concurrent refresh wins over the sweep.
#[derive(Debug, Default)]
pub struct MemWhitelist {
    entries: RwLock<HashMap<IpAddr, Instant>>,
}

impl ExpiringSet for MemWhitelist {
    fn insert(&self, source: IpAddr, ttl: Duration) {
        self.entries.write().insert(source, Instant::now() + ttl);
    }

    fn remove_expired(&self, now: Instant) -> usize {
        let expired: Vec<IpAddr> = self
            .entries
            .read()
            .iter()
            .filter(|(_, expiry)| **expiry <= now)
            .map(|(source, _)| *source)
            .collect();

        let mut removed = 0;
        for source in expired {
            let mut entries = self.entries.write();
            if entries.get(&source).is_some_and(|expiry| *expiry <= now) {
                entries.remove(&source);
                removed += 1;
            }
        }
        removed
    }

    fn contains(&self, source: &IpAddr) -> bool {
        self.entries.read().contains_key(source)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
