//! Vaultbook Common Types
//!
//! This crate contains the shared types used across the Vaultbook savings
//! ledger: identifiers, monetary helpers, error definitions and time
//! utilities.

pub mod error;
pub mod identifiers;
pub mod monetary;
pub mod time;

pub use error::*;
pub use identifiers::*;
pub use monetary::*;
pub use time::*;
