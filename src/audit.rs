//! Append-only attacker forensics log.
//!
//! Every interaction with a decoy service is recorded as one JSON object per
//! line in a durable audit file. Writes are best-effort: a failure to open or
//! write is traced and swallowed, never surfaced to the session or aggregator
//! that triggered it.
//!
//! # Record Format
//!
//! ```json
//! {"timestamp":"2026-08-05T14:32:01+00:00","src_ip":"203.0.113.7:41222","command":"TRAP_HIT","risk_level":"HIGH"}
//! ```

use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the audit log inside the configured log directory.
pub const AUDIT_FILE_NAME: &str = "audit.json";

/// Risk classification of a recorded interaction.
///
/// Every contact with a decoy is treated as hostile, so currently only one
/// level exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Hostile interaction with a decoy service.
    High,
}

/// One immutable forensics record. Appended, never mutated or deleted.
#[derive(Debug, Clone, Serialize)]
pub struct AttackLogEntry {
    /// RFC3339 timestamp of the interaction.
    pub timestamp: String,
    /// Remote address of the attacker.
    pub src_ip: String,
    /// The command (or marker such as `TRAP_HIT`) observed.
    pub command: String,
    /// Risk classification.
    pub risk_level: RiskLevel,
}

impl AttackLogEntry {
    /// Build an entry stamped with the current time.
    pub fn now(src_ip: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            src_ip: src_ip.into(),
            command: command.into(),
            risk_level: RiskLevel::High,
        }
    }
}

/// Best-effort writer for the append-only audit file.
///
/// Each append opens, writes and releases the file independently, so no
/// handle is held across calls and concurrent sessions never contend on a
/// shared writer.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Create a logger writing to `<log_dir>/audit.json`.
    ///
    /// The directory is created lazily on first append.
    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        Self {
            path: log_dir.as_ref().join(AUDIT_FILE_NAME),
        }
    }

    /// The path of the audit file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. Failures are traced and swallowed.
    pub fn append(&self, entry: &AttackLogEntry) {
        if let Err(e) = self.try_append(entry) {
            debug!("audit append failed: {}", e);
        }
    }

    fn try_append(&self, entry: &AttackLogEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');
        file.write_all(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_serializes_as_high() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
    }

    #[test]
    fn test_entry_serialization() {
        let entry = AttackLogEntry {
            timestamp: "2026-08-05T10:00:00+00:00".to_string(),
            src_ip: "203.0.113.7:41222".to_string(),
            command: "TRAP_HIT".to_string(),
            risk_level: RiskLevel::High,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"timestamp\":\"2026-08-05T10:00:00+00:00\""));
        assert!(json.contains("\"src_ip\":\"203.0.113.7:41222\""));
        assert!(json.contains("\"command\":\"TRAP_HIT\""));
        assert!(json.contains("\"risk_level\":\"HIGH\""));
    }

    #[test]
    fn test_append_creates_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("logs"));

        log.append(&AttackLogEntry::now("198.51.100.2:9", "whoami"));
        log.append(&AttackLogEntry::now("198.51.100.2:9", "exit"));

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["src_ip"], "198.51.100.2:9");
            assert_eq!(value["risk_level"], "HIGH");
            assert!(value["timestamp"].as_str().unwrap().contains('T'));
        }
    }

    #[test]
    fn test_append_swallows_unwritable_path() {
        // Appending under a path that cannot be created must not panic.
        let log = AuditLog::new("/proc/phantom-grid-nonexistent");
        log.append(&AttackLogEntry::now("203.0.113.1:1", "TRAP_HIT"));
    }
}
