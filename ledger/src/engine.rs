//! Savings engine: deposits, withdrawals and account reads.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};

use vaultbook_common::{monetary, now, EncodedKey, LedgerError, Result};

use crate::account::Account;
use crate::config::LedgerConfig;
use crate::metrics::SharedMetrics;
use crate::movement::{Movement, MovementKind};
use crate::store::{AccountEntry, LedgerStore};

/// Receipt for a committed deposit or withdrawal.
#[derive(Debug, Clone, Serialize)]
pub struct MovementReceipt {
    /// Sequence of the committed movement within its account.
    pub movement_id: u64,
    /// The account the movement was applied to.
    pub encoded_key: EncodedKey,
    /// When the movement was committed.
    pub recorded_at: DateTime<Utc>,
}

/// Applies balance-affecting operations to the ledger store.
///
/// Every mutation runs under the store's per-account lock: the balance is
/// read, checked, updated and the movement appended as one unit, so
/// concurrent requests against the same account serialize instead of
/// losing updates.
pub struct SavingsEngine {
    store: Arc<LedgerStore>,
    config: LedgerConfig,
    metrics: SharedMetrics,
}

impl SavingsEngine {
    /// Create an engine over the given store.
    pub fn new(store: Arc<LedgerStore>, config: LedgerConfig, metrics: SharedMetrics) -> Self {
        Self {
            store,
            config,
            metrics,
        }
    }

    /// Deposit `amount` into the account identified by `encoded_key`.
    #[instrument(skip(self, memo, reference), fields(account = %encoded_key))]
    pub async fn deposit(
        &self,
        encoded_key: &EncodedKey,
        amount: Decimal,
        memo: &str,
        reference: Option<&str>,
    ) -> Result<MovementReceipt> {
        self.validate_request(amount, memo, reference)?;

        let mut entry = self.store.lock(encoded_key).await?;
        let receipt = self.commit(&mut entry, MovementKind::Deposit, amount, memo, reference);
        self.metrics.deposit_recorded();
        info!(
            movement = receipt.movement_id,
            amount = %amount,
            balance = %entry.account.balance,
            "Deposit committed"
        );
        Ok(receipt)
    }

    /// Withdraw `amount` from the account identified by `encoded_key`.
    ///
    /// The funds check runs under the same lock as the mutation, so the
    /// balance can never be pushed below zero by concurrent withdrawals.
    /// Withdrawing the exact balance is allowed.
    #[instrument(skip(self, memo, reference), fields(account = %encoded_key))]
    pub async fn withdraw(
        &self,
        encoded_key: &EncodedKey,
        amount: Decimal,
        memo: &str,
        reference: Option<&str>,
    ) -> Result<MovementReceipt> {
        self.validate_request(amount, memo, reference)?;

        let mut entry = self.store.lock(encoded_key).await?;
        if !entry.account.can_withdraw(amount) {
            self.metrics.withdrawal_rejected();
            warn!(
                requested = %amount,
                available = %entry.account.balance,
                "Withdrawal rejected"
            );
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: entry.account.balance,
            });
        }

        let receipt = self.commit(&mut entry, MovementKind::Withdraw, amount, memo, reference);
        self.metrics.withdrawal_recorded();
        info!(
            movement = receipt.movement_id,
            amount = %amount,
            balance = %entry.account.balance,
            "Withdrawal committed"
        );
        Ok(receipt)
    }

    /// Current state of an account.
    ///
    /// Absence is an explicit `AccountNotFound`, never a default: a zero
    /// balance and a missing account are distinct outcomes.
    pub async fn account(&self, encoded_key: &EncodedKey) -> Result<Account> {
        let entry = self.store.lock(encoded_key).await?;
        Ok(entry.account.clone())
    }

    /// Movement history, newest first (`recorded_at` descending, sequence
    /// descending on timestamp ties).
    ///
    /// A missing account yields an empty history rather than an error;
    /// transient lock failures still surface.
    pub async fn movements(&self, encoded_key: &EncodedKey) -> Result<Vec<Movement>> {
        match self.store.lock(encoded_key).await {
            Ok(entry) => Ok(entry.log.history_desc()),
            Err(LedgerError::AccountNotFound(_)) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    fn validate_request(&self, amount: Decimal, memo: &str, reference: Option<&str>) -> Result<()> {
        if !monetary::is_valid_magnitude(amount, self.config.max_transaction_amount) {
            self.metrics.request_invalid();
            return Err(LedgerError::InvalidAmount {
                amount,
                limit: self.config.max_transaction_amount,
            });
        }

        let memo_len = memo.chars().count();
        if memo_len > self.config.max_memo_len {
            self.metrics.request_invalid();
            return Err(LedgerError::FieldTooLong {
                field: "memo",
                len: memo_len,
                max: self.config.max_memo_len,
            });
        }

        if let Some(reference) = reference {
            let reference_len = reference.chars().count();
            if reference_len > self.config.max_reference_len {
                self.metrics.request_invalid();
                return Err(LedgerError::FieldTooLong {
                    field: "reference",
                    len: reference_len,
                    max: self.config.max_reference_len,
                });
            }
        }

        Ok(())
    }

    /// Apply one movement while holding the account guard.
    ///
    /// No await points here: balance update and append complete together
    /// even if the caller abandons the request mid-flight.
    fn commit(
        &self,
        entry: &mut AccountEntry,
        kind: MovementKind,
        amount: Decimal,
        memo: &str,
        reference: Option<&str>,
    ) -> MovementReceipt {
        let balance_before = entry.account.balance;
        let delta = match kind {
            MovementKind::Deposit => amount,
            MovementKind::Withdraw => -amount,
        };
        entry.account.balance += delta;

        let sequence = entry.log.next_sequence();
        let recorded_at = now();
        entry.log.append(Movement {
            sequence,
            account_id: entry.account.id,
            account_encoded_key: entry.account.encoded_key.clone(),
            kind,
            amount,
            memo: memo.to_string(),
            reference: reference.map(str::to_string),
            balance_before,
            balance_after: entry.account.balance,
            recorded_at,
            channel: self.config.channel.clone(),
        });

        MovementReceipt {
            movement_id: sequence,
            encoded_key: entry.account.encoded_key.clone(),
            recorded_at,
        }
    }
}
