//! The attacker interaction state machine for one connection.
//!
//! A session greets the peer with a randomly chosen identity, records the
//! trap hit, then plays out that identity's interaction strategy. No command
//! is ever executed; every line the attacker sends is recorded and rejected.
//!
//! I/O failures terminate the session and nothing else.

use crate::audit::{AttackLogEntry, AuditLog};
use crate::events::{EventBus, EventCategory};
use std::net::SocketAddr;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;
use uuid::Uuid;

use super::profile::{InteractionStrategy, ServiceProfile};

/// Response to any command in a line-oriented session.
const COMMAND_REJECTION: &[u8] = b"bash: command not found\n";

/// Fixed body returned by the single-exchange strategy.
const HTTP_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\r\nServer Running";

/// Largest request buffer the single-exchange strategy will read.
const SINGLE_EXCHANGE_READ_LIMIT: u64 = 4096;

/// Run one decoy session to completion.
///
/// Generic over the stream so tests can drive it with an in-memory duplex.
/// The returned error is only ever observed by the spawning task's debug
/// trace; it never propagates past the session.
pub async fn run_session<S>(
    stream: S,
    peer: SocketAddr,
    bus: &EventBus,
    audit: &AuditLog,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let session_id = Uuid::new_v4();
    let (profile, banner) = {
        let mut rng = rand::thread_rng();
        let profile = ServiceProfile::random(&mut rng);
        (profile, profile.pick_banner(&mut rng))
    };

    debug!(session = %session_id, peer = %peer, service = %profile, "decoy session opened");

    let (reader, mut writer) = io::split(stream);

    writer.write_all(banner.as_bytes()).await?;
    writer.flush().await?;

    let _ = bus
        .emit(
            EventCategory::Trap,
            format!("TRAP HIT! IP: {} | Service: {}", peer, profile),
        )
        .await;
    audit.append(&AttackLogEntry::now(peer.to_string(), "TRAP_HIT"));

    match profile.strategy() {
        InteractionStrategy::LineOriented => {
            line_oriented(reader, writer, peer, bus, audit).await
        }
        InteractionStrategy::SingleExchange => single_exchange(reader, writer).await,
    }
}

/// Shell-style loop: record every line, reject every command, stop on `exit`.
async fn line_oriented<R, W>(
    reader: R,
    mut writer: W,
    peer: SocketAddr,
    bus: &EventBus,
    audit: &AuditLog,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader);
    let mut buf = String::new();

    loop {
        buf.clear();
        let n = lines.read_line(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }

        let input = buf.trim();
        if !input.is_empty() {
            let _ = bus.emit(EventCategory::Command, input.to_string()).await;
            audit.append(&AttackLogEntry::now(peer.to_string(), input));
        }

        if input == "exit" {
            return Ok(());
        }

        if !input.is_empty() {
            writer.write_all(COMMAND_REJECTION).await?;
            writer.flush().await?;
        }
    }
}

/// One request in, one canned response out.
async fn single_exchange<R, W>(reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut request = Vec::new();
    let mut limited = reader.take(SINGLE_EXCHANGE_READ_LIMIT);
    let _ = limited.read_buf(&mut request).await?;

    writer.write_all(HTTP_RESPONSE).await?;
    writer.flush().await?;
    Ok(())
}
