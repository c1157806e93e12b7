//! Command-line interface definitions.
//!
//! Uses clap's derive API for type-safe argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Active defense honeypot with live threat telemetry.
///
/// phantom-grid lures redirected intruders into fake services, records every
/// interaction to an append-only forensics log, and renders live telemetry
/// from the kernel-resident classifiers on a terminal dashboard.
#[derive(Parser, Debug)]
#[command(name = "phantom-grid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TCP port for the honeypot listener.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Interface the kernel collaborators attach to.
    #[arg(short = 'i', long = "iface")]
    pub iface: Option<String>,

    /// Directory for the append-only audit log.
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Cap on concurrently live decoy sessions.
    #[arg(long = "max-sessions", value_name = "N")]
    pub max_sessions: Option<usize>,

    /// Path to a TOML config file.
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run without the dashboard; forensics lines go to the debug log.
    #[arg(long = "headless")]
    pub headless: bool,

    /// Increase log verbosity.
    ///
    /// Can be specified multiple times:
    /// -v    = info level
    /// -vv   = debug level
    /// -vvv  = trace level
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply CLI overrides on top of a loaded config.
    pub fn apply(&self, mut config: crate::config::Config) -> crate::config::Config {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref iface) = self.iface {
            config.iface = iface.clone();
        }
        if let Some(ref log_dir) = self.log_dir {
            config.log_dir = log_dir.clone();
        }
        if let Some(max_sessions) = self.max_sessions {
            config.max_sessions = max_sessions;
        }
        config
    }
}
