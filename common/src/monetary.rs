//! Monetary helpers for the savings ledger.
//!
//! All balances and transaction amounts use exact decimal arithmetic;
//! binary floating point never enters balance accumulation.

use rust_decimal::Decimal;

/// A monetary amount in the ledger's single book currency.
pub type Amount = Decimal;

/// Zero amount.
pub fn zero() -> Amount {
    Decimal::ZERO
}

/// Check that an amount is usable as a transaction magnitude: strictly
/// positive and no larger than `ceiling`. `Decimal` values are always
/// finite, so these two checks are exhaustive.
pub fn is_valid_magnitude(amount: Amount, ceiling: Amount) -> bool {
    amount > Decimal::ZERO && amount <= ceiling
}
