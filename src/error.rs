//! Error types for the timer store

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or persisting the timer state
#[derive(Debug, Error)]
pub enum StoreError {
    /// The state file exists but does not hold a valid timer record
    #[error("State file {path} is corrupt: {source}")]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The state file exists but could not be read
    #[error("Failed to read state file {path}: {source}")]
    StateUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the state file failed after the in-memory state was changed
    #[error("Failed to persist state to {path}: {source}")]
    PersistenceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A thread panicked while holding the state lock
    #[error("Timer state lock was poisoned")]
    LockPoisoned,
}
