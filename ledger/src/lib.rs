//! Vaultbook Savings Ledger
//!
//! Account balances plus an append-only movement log per account, with
//! per-account serialization of every balance-affecting operation.

pub mod account;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod movement;
pub mod registrar;
pub mod store;

pub use account::Account;
pub use config::LedgerConfig;
pub use engine::{MovementReceipt, SavingsEngine};
pub use metrics::{Metrics, MetricsSnapshot, SharedMetrics};
pub use movement::{Movement, MovementKind, MovementLog};
pub use registrar::{AccountRegistrar, RegistrationReceipt};
pub use store::{AccountEntry, CreateOutcome, LedgerStore};
