//! End-to-end honeypot scenarios over real TCP connections.

use phantom_grid::audit::AuditLog;
use phantom_grid::decoy::{HoneypotServer, ServiceProfile};
use phantom_grid::events::{event_channel_with_capacity, EventCategory, EventStream};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

struct Harness {
    addr: SocketAddr,
    events: EventStream,
    audit: AuditLog,
    _dir: tempfile::TempDir,
}

async fn start_honeypot(max_sessions: usize) -> Harness {
    let (bus, events) = event_channel_with_capacity(100);
    let dir = tempfile::tempdir().unwrap();
    let audit = AuditLog::new(dir.path());

    let server = HoneypotServer::bind("127.0.0.1:0", max_sessions, bus, audit.clone())
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    Harness {
        addr,
        events,
        audit,
        _dir: dir,
    }
}

/// Connect and read the greeting. `None` means the pool rejected us.
async fn connect_for_banner(addr: SocketAddr) -> Option<(TcpStream, String)> {
    let mut conn = TcpStream::connect(addr).await.unwrap();
    let mut buf = vec![0u8; 512];
    let n = conn.read(&mut buf).await.unwrap();
    if n == 0 {
        return None;
    }
    Some((conn, String::from_utf8_lossy(&buf[..n]).to_string()))
}

/// Connect until a decoy with a shell-style identity answers.
///
/// The banner identifies the corpus, so an HTTP identity (single-exchange
/// strategy) can be detected and skipped; pool rejections are retried.
async fn connect_line_oriented(addr: SocketAddr) -> (TcpStream, String) {
    for _ in 0..200 {
        match connect_for_banner(addr).await {
            Some((conn, banner)) if !banner.starts_with("HTTP/") => return (conn, banner),
            Some((conn, _http)) => drop(conn),
            None => {}
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("never drew a line-oriented identity");
}

fn banner_in_some_corpus(banner: &str) -> bool {
    ServiceProfile::ALL
        .iter()
        .flat_map(|p| p.banners().iter())
        .any(|b| *b == banner)
}

async fn wait_for_audit_line(audit: &AuditLog, needle: &str) -> bool {
    for _ in 0..50 {
        if let Ok(contents) = std::fs::read_to_string(audit.path()) {
            if contents.lines().any(|l| l.contains(needle)) {
                return true;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn shell_session_rejects_command_then_exits() {
    let mut harness = start_honeypot(8).await;

    let (conn, banner) = connect_line_oriented(harness.addr).await;
    assert!(banner_in_some_corpus(&banner), "unknown banner {banner:?}");

    let (reader, mut writer) = conn.into_split();
    let mut lines = BufReader::new(reader);

    writer.write_all(b"whoami\n").await.unwrap();
    let mut response = String::new();
    lines.read_line(&mut response).await.unwrap();
    assert_eq!(response, "bash: command not found\n");

    writer.write_all(b"exit\n").await.unwrap();

    // The session closes with no further writes.
    let mut rest = String::new();
    let n = lines.read_line(&mut rest).await.unwrap();
    assert_eq!(n, 0, "unexpected data after exit: {rest:?}");

    // Both the trap hit and the command were recorded.
    assert!(wait_for_audit_line(&harness.audit, "TRAP_HIT").await);
    assert!(wait_for_audit_line(&harness.audit, "whoami").await);

    let mut saw_trap = false;
    let mut saw_command = false;
    while let Some(event) = harness.events.try_recv() {
        match event.category {
            EventCategory::Trap => saw_trap = true,
            EventCategory::Command if event.message == "whoami" => saw_command = true,
            _ => {}
        }
    }
    assert!(saw_trap, "no trap event emitted");
    assert!(saw_command, "no command event emitted");
}

/// Keep the bounded stream drained for tests that don't inspect events.
fn drain_in_background(mut events: EventStream) {
    tokio::spawn(async move { while events.recv().await.is_some() {} });
}

#[tokio::test]
async fn every_banner_comes_from_a_configured_corpus() {
    let harness = start_honeypot(16).await;
    drain_in_background(harness.events);

    let mut seen = 0;
    while seen < 10 {
        if let Some((_conn, banner)) = connect_for_banner(harness.addr).await {
            assert!(banner_in_some_corpus(&banner), "unknown banner {banner:?}");
            seen += 1;
        } else {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[tokio::test]
async fn pool_exhaustion_drops_new_connections() {
    let mut harness = start_honeypot(1).await;

    // Occupy the only slot with a live line-oriented session.
    let (held, _banner) = connect_line_oriented(harness.addr).await;
    while harness.events.try_recv().is_some() {}

    // The next connection is accepted and immediately dropped: no banner.
    let mut rejected = TcpStream::connect(harness.addr).await.unwrap();
    let mut buf = vec![0u8; 64];
    let n = tokio::time::timeout(Duration::from_secs(2), rejected.read(&mut buf))
        .await
        .expect("rejected connection was neither served nor closed")
        .unwrap();
    assert_eq!(n, 0, "expected no banner on a rejected connection");

    // The held session is unaffected.
    let (reader, mut writer) = held.into_split();
    let mut lines = BufReader::new(reader);
    writer.write_all(b"id\n").await.unwrap();
    let mut response = String::new();
    lines.read_line(&mut response).await.unwrap();
    assert_eq!(response, "bash: command not found\n");

    // Releasing the slot lets the next connection through.
    writer.write_all(b"exit\n").await.unwrap();
    drop(writer);
    drop(lines);
    while harness.events.try_recv().is_some() {}

    let mut served = false;
    for _ in 0..100 {
        if connect_for_banner(harness.addr).await.is_some() {
            served = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(served, "slot was never released");
}

#[tokio::test]
async fn http_identity_serves_one_exchange() {
    let harness = start_honeypot(16).await;
    drain_in_background(harness.events);

    // Draw connections until the HTTP identity comes up.
    for _ in 0..300 {
        let Some((mut conn, banner)) = connect_for_banner(harness.addr).await else {
            tokio::time::sleep(Duration::from_millis(10)).await;
            continue;
        };
        if !banner.starts_with("HTTP/") {
            continue;
        }

        conn.write_all(b"GET /admin HTTP/1.1\r\nHost: bait\r\n\r\n")
            .await
            .unwrap();

        let mut body = Vec::new();
        conn.read_to_end(&mut body).await.unwrap();
        assert_eq!(body, b"HTTP/1.1 200 OK\r\n\r\nServer Running");
        return;
    }
    panic!("never drew the HTTP identity");
}
