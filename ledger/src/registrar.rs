//! Idempotent account registration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use vaultbook_common::{AccountId, CustomerId, EncodedKey, LedgerError, Result};

use crate::account::Account;
use crate::config::LedgerConfig;
use crate::metrics::SharedMetrics;
use crate::store::{CreateOutcome, LedgerStore};

/// Receipt returned by [`AccountRegistrar::register`].
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReceipt {
    /// Assigned account identifier.
    pub id: AccountId,
    /// The idempotency key the account is registered under.
    pub encoded_key: EncodedKey,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// True when the key was registered before; the receipt then describes
    /// the existing account.
    pub already_existed: bool,
}

impl RegistrationReceipt {
    fn for_account(account: &Account, already_existed: bool) -> Self {
        Self {
            id: account.id,
            encoded_key: account.encoded_key.clone(),
            created_at: account.created_at,
            already_existed,
        }
    }
}

/// Creates savings accounts exactly once per encoded key.
///
/// The owning customer is resolved and verified upstream; the registrar
/// trusts the `CustomerId` it is handed.
pub struct AccountRegistrar {
    store: Arc<LedgerStore>,
    config: LedgerConfig,
    metrics: SharedMetrics,
}

impl AccountRegistrar {
    /// Create a registrar over the given store.
    pub fn new(store: Arc<LedgerStore>, config: LedgerConfig, metrics: SharedMetrics) -> Self {
        Self {
            store,
            config,
            metrics,
        }
    }

    /// Register a savings account for `owner_id` under `encoded_key`.
    ///
    /// A duplicate key is a normal outcome, not an error: the existing
    /// account is reported with `already_existed = true` and nothing new is
    /// created. Both paths are race-safe; two concurrent calls with the
    /// same key yield exactly one persisted account.
    #[instrument(skip(self), fields(account = %encoded_key))]
    pub async fn register(
        &self,
        owner_id: CustomerId,
        encoded_key: EncodedKey,
    ) -> Result<RegistrationReceipt> {
        if !encoded_key.is_valid(self.config.max_key_len) {
            self.metrics.request_invalid();
            return Err(LedgerError::InvalidKey {
                reason: "must be non-empty and within the configured length",
            });
        }

        match self.store.create(owner_id, encoded_key).await? {
            CreateOutcome::Created(account) => {
                self.metrics.account_created();
                info!(id = %account.id, owner = %account.owner_id, "Savings account registered");
                Ok(RegistrationReceipt::for_account(&account, false))
            }
            CreateOutcome::Existing(account) => {
                self.metrics.account_duplicate();
                info!(id = %account.id, "Savings account already registered");
                Ok(RegistrationReceipt::for_account(&account, true))
            }
        }
    }
}
