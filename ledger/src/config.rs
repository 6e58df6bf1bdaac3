//! Ledger configuration.

use std::time::Duration;

use rust_decimal::Decimal;

use vaultbook_common::constants;

/// Savings ledger configuration.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Largest amount accepted for a single deposit or withdrawal.
    pub max_transaction_amount: Decimal,
    /// Maximum memo length in characters.
    pub max_memo_len: usize,
    /// Maximum reference length in characters.
    pub max_reference_len: usize,
    /// Maximum encoded key length in characters.
    pub max_key_len: usize,
    /// Provenance tag stamped on every movement.
    pub channel: String,
    /// Per-account lock acquisition timeout.
    pub lock_timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_transaction_amount: Decimal::from(10_000_000),
            max_memo_len: 48,
            max_reference_len: 48,
            max_key_len: 100,
            channel: "API".to_string(),
            lock_timeout: constants::default_lock_timeout(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("LEDGER_MAX_TRANSACTION_AMOUNT") {
            if let Ok(amount) = raw.parse() {
                config.max_transaction_amount = amount;
            }
        }

        if let Ok(channel) = std::env::var("LEDGER_CHANNEL") {
            config.channel = channel;
        }

        if let Ok(raw) = std::env::var("LEDGER_LOCK_TIMEOUT_MS") {
            if let Ok(ms) = raw.parse() {
                config.lock_timeout = Duration::from_millis(ms);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_transaction_amount <= Decimal::ZERO {
            return Err("Max transaction amount must be positive".to_string());
        }

        if self.channel.is_empty() {
            return Err("Channel cannot be empty".to_string());
        }

        if self.lock_timeout.is_zero() {
            return Err("Lock timeout cannot be zero".to_string());
        }

        if self.max_key_len == 0 {
            return Err("Max key length cannot be zero".to_string());
        }

        Ok(())
    }
}
