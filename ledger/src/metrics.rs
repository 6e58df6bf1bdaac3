//! Metrics collection for ledger monitoring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Ledger operation metrics.
pub struct Metrics {
    /// Accounts created.
    pub accounts_created: AtomicU64,
    /// Duplicate registrations collapsed into existing accounts.
    pub accounts_duplicate: AtomicU64,
    /// Deposits committed.
    pub deposits_total: AtomicU64,
    /// Withdrawals committed.
    pub withdrawals_total: AtomicU64,
    /// Withdrawals rejected for insufficient funds.
    pub withdrawals_rejected: AtomicU64,
    /// Requests rejected before storage access (bad amount or field).
    pub requests_invalid: AtomicU64,
}

impl Metrics {
    /// Create new metrics instance.
    pub fn new() -> Self {
        Self {
            accounts_created: AtomicU64::new(0),
            accounts_duplicate: AtomicU64::new(0),
            deposits_total: AtomicU64::new(0),
            withdrawals_total: AtomicU64::new(0),
            withdrawals_rejected: AtomicU64::new(0),
            requests_invalid: AtomicU64::new(0),
        }
    }

    /// Record a fresh account creation.
    pub fn account_created(&self) {
        self.accounts_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a duplicate registration.
    pub fn account_duplicate(&self) {
        self.accounts_duplicate.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a committed deposit.
    pub fn deposit_recorded(&self) {
        self.deposits_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a committed withdrawal.
    pub fn withdrawal_recorded(&self) {
        self.withdrawals_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a withdrawal rejected for insufficient funds.
    pub fn withdrawal_rejected(&self) {
        self.withdrawals_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request rejected before storage access.
    pub fn request_invalid(&self) {
        self.requests_invalid.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            accounts_created: self.accounts_created.load(Ordering::Relaxed),
            accounts_duplicate: self.accounts_duplicate.load(Ordering::Relaxed),
            deposits_total: self.deposits_total.load(Ordering::Relaxed),
            withdrawals_total: self.withdrawals_total.load(Ordering::Relaxed),
            withdrawals_rejected: self.withdrawals_rejected.load(Ordering::Relaxed),
            requests_invalid: self.requests_invalid.load(Ordering::Relaxed),
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            r#"# HELP vaultbook_accounts_created Total accounts created
# TYPE vaultbook_accounts_created counter
vaultbook_accounts_created {}

# HELP vaultbook_accounts_duplicate Total duplicate registrations
# TYPE vaultbook_accounts_duplicate counter
vaultbook_accounts_duplicate {}

# HELP vaultbook_deposits_total Total deposits committed
# TYPE vaultbook_deposits_total counter
vaultbook_deposits_total {}

# HELP vaultbook_withdrawals_total Total withdrawals committed
# TYPE vaultbook_withdrawals_total counter
vaultbook_withdrawals_total {}

# HELP vaultbook_withdrawals_rejected Total withdrawals rejected for insufficient funds
# TYPE vaultbook_withdrawals_rejected counter
vaultbook_withdrawals_rejected {}

# HELP vaultbook_requests_invalid Total requests rejected before storage access
# TYPE vaultbook_requests_invalid counter
vaultbook_requests_invalid {}
"#,
            snapshot.accounts_created,
            snapshot.accounts_duplicate,
            snapshot.deposits_total,
            snapshot.withdrawals_total,
            snapshot.withdrawals_rejected,
            snapshot.requests_invalid,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub accounts_created: u64,
    pub accounts_duplicate: u64,
    pub deposits_total: u64,
    pub withdrawals_total: u64,
    pub withdrawals_rejected: u64,
    pub requests_invalid: u64,
}

/// Shared metrics instance.
pub type SharedMetrics = Arc<Metrics>;
