//! Error types for savings ledger operations.

use crate::identifiers::EncodedKey;
use crate::monetary::Amount;
use thiserror::Error;

/// Main error type for ledger operations.
///
/// Duplicate account registration is deliberately NOT represented here: a
/// repeated `encoded_key` is a normal idempotent outcome and is reported
/// through the registration receipt instead.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The encoded key does not resolve to any savings account.
    #[error("savings account not found: {0}")]
    AccountNotFound(EncodedKey),

    /// Business rejection: the withdrawal exceeds the available balance.
    /// No movement is recorded and the balance is unchanged.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Amount,
        available: Amount,
    },

    /// The amount is non-positive or exceeds the configured ceiling.
    /// Rejected before any storage access.
    #[error("invalid amount {amount}: must be positive and at most {limit}")]
    InvalidAmount { amount: Amount, limit: Amount },

    /// The encoded key fails shape validation.
    #[error("invalid encoded key: {reason}")]
    InvalidKey { reason: &'static str },

    /// A caller-supplied text field exceeds its bound.
    #[error("{field} too long: {len} characters, maximum {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Timed out waiting for the per-account lock. Transient; safe to retry.
    #[error("timed out acquiring account lock for {0}")]
    LockTimeout(EncodedKey),
}

impl LedgerError {
    /// Check if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::LockTimeout(_))
    }

    /// Get a stable error code for callers that map errors to wire formats.
    pub fn error_code(&self) -> &'static str {
        match self {
            LedgerError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            LedgerError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            LedgerError::InvalidAmount { .. } => "INVALID_AMOUNT",
            LedgerError::InvalidKey { .. } => "INVALID_KEY",
            LedgerError::FieldTooLong { .. } => "FIELD_TOO_LONG",
            LedgerError::LockTimeout(_) => "LOCK_TIMEOUT",
        }
    }
}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
