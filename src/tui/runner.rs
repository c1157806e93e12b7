//! Dashboard event loop runner.
//!
//! The loop waits on three sources at once: the render tick, the stats
//! watch channel, and the event stream. Each pass drains pending events,
//! picks up a changed stats value, redraws every panel, then polls keyboard
//! input with the tick timeout. `q` or Ctrl+C is the only graceful exit.

use super::app::DashboardApp;
use super::input::{handle_event, InputResult};
use super::layout::DashboardLayout;
use super::widgets::{AnalysisWidget, CounterBox, HeaderWidget, LogsWidget, ThreatGauge};
use crossterm::{
    event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;
use tracing::{error, info};

/// Cadence of full redraws.
pub const RENDER_TICK: Duration = Duration::from_millis(200);

/// Dashboard runner that manages the terminal and event loop.
pub struct DashboardRunner {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl DashboardRunner {
    /// Initialize the terminal for dashboard mode.
    ///
    /// Enables raw mode and enters an alternate screen. Failure here is
    /// fatal to the process.
    pub fn new() -> io::Result<Self> {
        // Restore the terminal if the render loop panics.
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        info!("dashboard initialized");

        Ok(Self { terminal })
    }

    /// Restore the terminal to normal mode.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;

        info!("dashboard restored terminal");

        Ok(())
    }

    /// Run the dashboard until the quit key terminates it.
    pub async fn run(&mut self, app: &mut DashboardApp) -> io::Result<()> {
        loop {
            // Drain pending forensics events.
            while app.try_process_event() {}

            // Pick up the aggregator's latest publication.
            app.refresh_stats();

            self.terminal.draw(|frame| render_ui(frame, app))?;

            if app.should_quit() {
                break;
            }

            // Wait for input up to one render tick.
            if event::poll(RENDER_TICK)? {
                let event = event::read()?;
                if handle_event(app, event) == InputResult::Quit {
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Drop for DashboardRunner {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!("failed to restore terminal: {}", e);
        }
    }
}

/// Render the complete dashboard.
fn render_ui(frame: &mut Frame, app: &DashboardApp) {
    let layout = DashboardLayout::compute(frame.area());
    let stats = app.stats();

    frame.render_widget(HeaderWidget::new(app.iface(), app.dlp_active()), layout.header);
    frame.render_widget(LogsWidget::new(app.rows(), app.event_count()), layout.logs);
    frame.render_widget(ThreatGauge::new(stats.gauge), layout.gauge);
    frame.render_widget(AnalysisWidget::new(app.last_command()), layout.analysis);
    frame.render_widget(CounterBox::redirected(stats.counters.attacks), layout.redirected);
    frame.render_widget(CounterBox::stealth_drops(stats.counters.stealth_drops), layout.stealth);
    frame.render_widget(CounterBox::egress_blocks(stats.counters.egress_blocks), layout.egress);
}
