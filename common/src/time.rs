//! Time utilities for the savings ledger.

use chrono::{DateTime, Utc};

/// A timestamp with timezone (always UTC in the ledger).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Default timing constants.
pub mod constants {
    use std::time::Duration;

    /// Default per-account lock acquisition timeout.
    pub fn default_lock_timeout() -> Duration {
        Duration::from_secs(5)
    }
}
