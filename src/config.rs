//! Engine configuration.
//!
//! Defaults cover a bare install; an optional TOML file overrides them and
//! CLI flags override the file. Sweep and poll cadences are part of the
//! engine contract and deliberately not configurable.
//!
//! ```toml
//! port = 9999
//! iface = "ens33"
//! log_dir = "logs"
//! max_sessions = 256
//! ```

use crate::decoy::{DEFAULT_MAX_SESSIONS, HONEYPOT_PORT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default interface the kernel programs attach to.
pub const DEFAULT_IFACE: &str = "ens33";

/// Default directory for the audit log.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Runtime configuration for the engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// TCP port the honeypot listens on.
    pub port: u16,
    /// Interface the kernel collaborators attach to.
    pub iface: String,
    /// Directory holding the append-only audit log.
    pub log_dir: PathBuf,
    /// Cap on concurrently live decoy sessions.
    pub max_sessions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: HONEYPOT_PORT,
            iface: DEFAULT_IFACE.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The honeypot listen address.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
