//! Engine orchestration and lifecycle management.
//!
//! Wires the kernel collaborators, the honeypot, the whitelist sweeper, the
//! telemetry aggregator and the dashboard together. Background loops have no
//! coordinated shutdown: they end when the process exits after the dashboard
//! (or the headless drain) returns.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::audit::AuditLog;
use crate::cli::Cli;
use crate::config::Config;
use crate::decoy::HoneypotServer;
use crate::events::{event_channel, EventBus, EventCategory, EventStream};
use crate::kernel::KernelHandles;
use crate::stats::TelemetryAggregator;
use crate::sweep::WhitelistSweeper;
use crate::tui::{DashboardApp, DashboardRunner};

/// Run the engine until the dashboard terminates.
pub fn run(cli: &Cli, config: Config) -> Result<()> {
    // The classifier and whitelist collaborators are required; only the
    // egress/DLP one may be missing, which attach already degraded to None.
    let handles = KernelHandles::attach(&config.iface)
        .context("failed to acquire kernel collaborators")?;

    let (bus, stream) = event_channel();
    let audit = AuditLog::new(&config.log_dir);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let server = rt
        .block_on(HoneypotServer::bind(
            &config.listen_addr(),
            config.max_sessions,
            bus.clone(),
            audit.clone(),
        ))
        .context("failed to start honeypot listener")?;

    rt.block_on(announce_startup(&bus, &handles));

    let (aggregator, stats_rx) = TelemetryAggregator::new(&handles, bus.clone());
    let sweeper = WhitelistSweeper::new(handles.whitelist.clone(), bus.clone());

    rt.spawn(server.run());
    rt.spawn(sweeper.run());
    rt.spawn(aggregator.run());

    if cli.headless {
        info!("headless mode: forensics events routed to the debug log");
        rt.block_on(drain_events(stream));
        Ok(())
    } else {
        let mut app = DashboardApp::new(config.iface.as_str(), handles.dlp_active(), stream, stats_rx);
        let mut runner = DashboardRunner::new().context("failed to initialize display")?;
        rt.block_on(runner.run(&mut app))
            .context("dashboard loop failed")?;
        info!("dashboard terminated, shutting down");
        Ok(())
    }
}

/// Emit the startup lines every run begins with.
async fn announce_startup(bus: &EventBus, handles: &KernelHandles) {
    let _ = bus
        .emit(EventCategory::System, "deception engine initialized")
        .await;
    if handles.dlp_active() {
        let _ = bus
            .emit(EventCategory::System, "egress hook attached (DLP active)")
            .await;
    } else {
        warn!("running without egress DLP filtering");
        let _ = bus
            .emit(
                EventCategory::System,
                "egress DLP unavailable, exfiltration filtering disabled",
            )
            .await;
    }
}

/// Consume the event stream when no dashboard is attached.
///
/// The bounded stream must always have a consumer or producers would stall;
/// in headless mode every line goes to the debug log instead. Ends only if
/// every producer disappears, which in practice means process death.
async fn drain_events(mut stream: EventStream) {
    while let Some(event) = stream.recv().await {
        info!("{}", event.display_line());
    }
    error!("event stream closed unexpectedly");
}
