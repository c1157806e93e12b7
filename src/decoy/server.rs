//! The honeypot listener and session pool.
//!
//! Accepts redirected connections and runs one isolated session task per
//! connection. Live sessions are capped by a semaphore; when the pool is
//! exhausted new connections are dropped immediately after accept rather
//! than queued, so a burst can never starve sessions already in flight.

use crate::audit::AuditLog;
use crate::events::EventBus;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, info, trace};

use super::error::DecoyError;
use super::session::run_session;

/// Port the kernel classifier redirects suspect connections to.
pub const HONEYPOT_PORT: u16 = 9999;

/// Default cap on concurrently live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 256;

/// The honeypot accept loop, bound and ready to run.
pub struct HoneypotServer {
    listener: TcpListener,
    max_sessions: usize,
    bus: EventBus,
    audit: AuditLog,
    rejected: Arc<AtomicU64>,
}

impl HoneypotServer {
    /// Bind the listener on `addr` (e.g. `"0.0.0.0:9999"`).
    ///
    /// Binding failure is fatal to startup; there is no decoy without a
    /// listening socket.
    pub async fn bind(
        addr: &str,
        max_sessions: usize,
        bus: EventBus,
        audit: AuditLog,
    ) -> Result<Self, DecoyError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| DecoyError::Bind {
            addr: addr.to_string(),
            source: e,
        })?;

        Ok(Self {
            listener,
            max_sessions,
            bus,
            audit,
            rejected: Arc::new(AtomicU64::new(0)),
        })
    }

    /// The address the listener actually bound.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr().ok()
    }

    /// Counter of connections dropped because the pool was exhausted.
    pub fn rejected_handle(&self) -> Arc<AtomicU64> {
        self.rejected.clone()
    }

    /// Run the accept loop. Transient accept failures are traced and the
    /// loop continues; it ends with the process.
    pub async fn run(self) {
        if let Some(local) = self.local_addr() {
            info!(
                "honeypot listening on {} (max {} sessions)",
                local, self.max_sessions
            );
        }

        let permits = Arc::new(Semaphore::new(self.max_sessions));

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let permit = match permits.clone().try_acquire_owned() {
                        Ok(permit) => permit,
                        Err(_) => {
                            self.rejected.fetch_add(1, Ordering::Relaxed);
                            debug!("session pool exhausted, dropping {}", peer);
                            drop(stream);
                            continue;
                        }
                    };

                    let bus = self.bus.clone();
                    let audit = self.audit.clone();
                    tokio::spawn(async move {
                        let _permit = permit;
                        if let Err(e) = run_session(stream, peer, &bus, &audit).await {
                            debug!("session {} ended: {}", peer, e);
                        }
                    });
                }
                Err(e) => {
                    trace!("accept error (continuing): {e}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_channel_with_capacity;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpStream;

    fn fixture() -> (EventBus, crate::events::EventStream, AuditLog, tempfile::TempDir) {
        let (bus, stream) = event_channel_with_capacity(64);
        let dir = tempfile::tempdir().unwrap();
        let audit = AuditLog::new(dir.path());
        (bus, stream, audit, dir)
    }

    #[tokio::test]
    async fn test_bind_failure_is_fatal() {
        let (bus, _stream, audit, _dir) = fixture();
        // TEST-NET address, never assigned locally.
        let result = HoneypotServer::bind("192.0.2.1:9", 4, bus, audit).await;
        assert!(matches!(result, Err(DecoyError::Bind { .. })));
    }

    #[tokio::test]
    async fn test_each_connection_gets_a_banner() {
        let (bus, mut events, audit, _dir) = fixture();

        let server = HoneypotServer::bind("127.0.0.1:0", 8, bus, audit).await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.run());

        for _ in 0..3 {
            let mut conn = TcpStream::connect(addr).await.unwrap();
            let mut buf = vec![0u8; 256];
            let n = conn.read(&mut buf).await.unwrap();
            assert!(n > 0);

            let event = events.recv().await.unwrap();
            assert!(event.message.starts_with("TRAP HIT!"));
        }
    }
}
