//! Error types for the decoy listener.

use thiserror::Error;
use tokio::io;

/// Errors starting or running the honeypot listener.
///
/// Per-session I/O failures never surface here; they terminate only the
/// session that hit them.
#[derive(Debug, Error)]
pub enum DecoyError {
    /// Failed to bind the listening socket.
    #[error("failed to bind honeypot listener on {addr}: {source}")]
    Bind {
        /// The address we tried to bind.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
