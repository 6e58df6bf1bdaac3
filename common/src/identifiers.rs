//! Identifier types for savings ledger entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a savings account.
/// Opaque integer, assigned once by the ledger store and immutable after
/// creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AccountId(u64);

impl AccountId {
    /// Create an account ID from its raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the customer owning an account.
///
/// Resolution to a real customer (and any authentication) happens upstream
/// of the ledger; here the value is opaque.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CustomerId(u64);

impl CustomerId {
    /// Create a customer ID from its raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied idempotency key identifying one savings account.
/// Typically a GUID string generated by the caller; the ledger treats it as
/// an opaque token and uses it to collapse duplicate creation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedKey(String);

impl EncodedKey {
    /// Create an encoded key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True when the key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Basic shape check: non-empty and within `max_len` characters.
    pub fn is_valid(&self, max_len: usize) -> bool {
        !self.0.is_empty() && self.len() <= max_len
    }
}

impl fmt::Display for EncodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EncodedKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EncodedKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
