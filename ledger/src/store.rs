//! Keyed account storage and the per-account concurrency boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use vaultbook_common::{constants, AccountId, CustomerId, EncodedKey, LedgerError, Result};

use crate::account::Account;
use crate::movement::MovementLog;

/// An account together with its movement history.
///
/// Balance and log live behind the same mutex, so a deposit or withdrawal
/// commits both or neither.
#[derive(Debug)]
pub struct AccountEntry {
    pub account: Account,
    pub log: MovementLog,
}

/// Outcome of an account creation attempt.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    /// A new account was persisted.
    Created(Account),
    /// An account with this key already existed; its current state is
    /// returned.
    Existing(Account),
}

/// In-memory keyed store for savings accounts.
///
/// The store is the only shared mutable resource: it is the sole authority
/// for account existence and balances. Locking is per account, never
/// global; operations on different accounts proceed without contention.
pub struct LedgerStore {
    accounts: DashMap<EncodedKey, Arc<Mutex<AccountEntry>>>,
    next_account_id: AtomicU64,
    lock_timeout: Duration,
}

impl LedgerStore {
    /// Create an empty store with the given per-account lock timeout.
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            accounts: DashMap::new(),
            next_account_id: AtomicU64::new(1),
            lock_timeout,
        }
    }

    /// Create an account for `encoded_key`, or report the existing one.
    ///
    /// The vacant/occupied decision happens under the map's shard lock, so
    /// two concurrent calls with the same key cannot both create.
    pub async fn create(
        &self,
        owner_id: CustomerId,
        encoded_key: EncodedKey,
    ) -> Result<CreateOutcome> {
        match self.accounts.entry(encoded_key.clone()) {
            Entry::Occupied(slot) => {
                let handle = slot.get().clone();
                // Release the shard lock before waiting on the account.
                drop(slot);
                let entry = self.lock_handle(&encoded_key, handle).await?;
                Ok(CreateOutcome::Existing(entry.account.clone()))
            }
            Entry::Vacant(slot) => {
                let id = AccountId::new(self.next_account_id.fetch_add(1, Ordering::Relaxed));
                let account = Account::new(id, encoded_key.clone(), owner_id);
                slot.insert(Arc::new(Mutex::new(AccountEntry {
                    account: account.clone(),
                    log: MovementLog::new(),
                })));
                info!(account = %encoded_key, id = %id, "Account created");
                Ok(CreateOutcome::Created(account))
            }
        }
    }

    /// Acquire the lock for an account within the configured timeout.
    ///
    /// All reads and mutations of an account's state go through this guard;
    /// the commit order observed externally is the order in which callers
    /// acquire it.
    pub async fn lock(&self, encoded_key: &EncodedKey) -> Result<OwnedMutexGuard<AccountEntry>> {
        let handle = self
            .accounts
            .get(encoded_key)
            .map(|entry| entry.clone())
            .ok_or_else(|| LedgerError::AccountNotFound(encoded_key.clone()))?;
        self.lock_handle(encoded_key, handle).await
    }

    async fn lock_handle(
        &self,
        encoded_key: &EncodedKey,
        handle: Arc<Mutex<AccountEntry>>,
    ) -> Result<OwnedMutexGuard<AccountEntry>> {
        tokio::time::timeout(self.lock_timeout, handle.lock_owned())
            .await
            .map_err(|_| LedgerError::LockTimeout(encoded_key.clone()))
    }

    /// Check whether an account exists for the key.
    pub fn contains(&self, encoded_key: &EncodedKey) -> bool {
        self.accounts.contains_key(encoded_key)
    }

    /// Number of accounts in the store.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new(constants::default_lock_timeout())
    }
}
