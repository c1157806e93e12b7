//! Error types for kernel collaborator access.

use thiserror::Error;

/// Errors reading from or attaching to a kernel collaborator.
#[derive(Debug, Error)]
pub enum KernelError {
    /// The requested counter key does not exist in the map.
    #[error("no counter slot for key {0}")]
    UnknownKey(u32),

    /// The collaborator program could not be attached.
    #[error("failed to attach collaborator on {iface}: {message}")]
    Attach {
        /// Interface the attach was attempted on.
        iface: String,
        /// Underlying failure description.
        message: String,
    },
}
