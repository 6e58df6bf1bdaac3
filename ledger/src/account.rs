//! Savings account state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vaultbook_common::{now, AccountId, CustomerId, EncodedKey};

/// Display label stamped on every savings account at creation.
pub const DEFAULT_ACCOUNT_NAME: &str = "Deposito";

/// A savings account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier, assigned once at creation.
    pub id: AccountId,
    /// Caller-supplied idempotency key, unique across accounts.
    pub encoded_key: EncodedKey,
    /// Owning customer. Resolved upstream of the ledger.
    pub owner_id: CustomerId,
    /// Current balance. Mutated only by deposits and withdrawals under the
    /// store's per-account lock; never negative.
    pub balance: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Soft-deactivation flag; no current operation clears it.
    pub is_active: bool,
    /// Display label.
    pub name: String,
}

impl Account {
    /// Create a new active account with a zero balance.
    pub fn new(id: AccountId, encoded_key: EncodedKey, owner_id: CustomerId) -> Self {
        Self {
            id,
            encoded_key,
            owner_id,
            balance: Decimal::ZERO,
            created_at: now(),
            is_active: true,
            name: DEFAULT_ACCOUNT_NAME.to_string(),
        }
    }

    /// Check whether a withdrawal of `amount` is covered by the balance.
    /// Withdrawing the exact balance is allowed; the balance may reach zero
    /// but never go below it.
    pub fn can_withdraw(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}
