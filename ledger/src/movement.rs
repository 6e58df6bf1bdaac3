//! Movement records: the append-only history of balance-affecting events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vaultbook_common::{AccountId, EncodedKey};

/// Kind of balance-affecting movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    /// Funds added to the account.
    Deposit,
    /// Funds taken from the account.
    Withdraw,
}

/// One committed balance-affecting event on a savings account.
///
/// A movement is created exactly once by a deposit or withdrawal and is
/// never mutated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    /// 1-based position in the account's history; strictly increasing,
    /// never reused.
    pub sequence: u64,
    /// Owning account.
    pub account_id: AccountId,
    /// Owning account's encoded key.
    pub account_encoded_key: EncodedKey,
    /// Deposit or withdrawal.
    pub kind: MovementKind,
    /// Magnitude of the movement; the sign is implied by `kind`.
    pub amount: Decimal,
    /// Caller-supplied description.
    pub memo: String,
    /// Optional caller-supplied reference.
    pub reference: Option<String>,
    /// Account balance immediately before this movement.
    pub balance_before: Decimal,
    /// Account balance immediately after this movement.
    pub balance_after: Decimal,
    /// When the movement was committed.
    pub recorded_at: DateTime<Utc>,
    /// Provenance tag for the origin of the transaction.
    pub channel: String,
}

impl Movement {
    /// Signed effect on the balance: positive for deposits, negative for
    /// withdrawals.
    pub fn delta(&self) -> Decimal {
        match self.kind {
            MovementKind::Deposit => self.amount,
            MovementKind::Withdraw => -self.amount,
        }
    }
}

/// Append-only movement history for one account.
///
/// The sequence counter lives next to the entries and both are only touched
/// under the owning account's lock, so numbering never collides and does not
/// depend on the collection length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementLog {
    entries: Vec<Movement>,
    next_sequence: u64,
}

impl MovementLog {
    /// Create an empty log. The first appended movement gets sequence 1.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Sequence the next appended movement will carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Number of committed movements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no movement has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Committed movements in commit order.
    pub fn entries(&self) -> &[Movement] {
        &self.entries
    }

    /// Append a movement carrying the current `next_sequence`, then advance
    /// the counter.
    pub fn append(&mut self, movement: Movement) {
        debug_assert_eq!(movement.sequence, self.next_sequence);
        self.next_sequence += 1;
        self.entries.push(movement);
    }

    /// Net effect of all committed movements (sum of signed deltas).
    pub fn net(&self) -> Decimal {
        self.entries.iter().map(Movement::delta).sum()
    }

    /// Movements newest first: `recorded_at` descending, tie-broken by
    /// `sequence` descending so the order stays total when timestamps
    /// collide.
    pub fn history_desc(&self) -> Vec<Movement> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.sequence.cmp(&a.sequence))
        });
        out
    }
}

impl Default for MovementLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vaultbook_common::now;

    fn movement(log: &MovementLog, kind: MovementKind, amount: Decimal) -> Movement {
        movement_at(log, kind, amount, now())
    }

    fn movement_at(
        log: &MovementLog,
        kind: MovementKind,
        amount: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Movement {
        Movement {
            sequence: log.next_sequence(),
            account_id: AccountId::new(1),
            account_encoded_key: EncodedKey::new("k1"),
            kind,
            amount,
            memo: "test".to_string(),
            reference: None,
            balance_before: log.net(),
            balance_after: log.net() + signed(kind, amount),
            recorded_at,
            channel: "API".to_string(),
        }
    }

    fn signed(kind: MovementKind, amount: Decimal) -> Decimal {
        match kind {
            MovementKind::Deposit => amount,
            MovementKind::Withdraw => -amount,
        }
    }

    #[test]
    fn test_delta_signs() {
        let mut log = MovementLog::new();
        let deposit = movement(&log, MovementKind::Deposit, Decimal::from(100));
        assert_eq!(deposit.delta(), Decimal::from(100));
        log.append(deposit);

        let withdrawal = movement(&log, MovementKind::Withdraw, Decimal::from(40));
        assert_eq!(withdrawal.delta(), Decimal::from(-40));
        log.append(withdrawal);

        assert_eq!(log.net(), Decimal::from(60));
    }

    #[test]
    fn test_append_advances_sequence() {
        let mut log = MovementLog::new();
        assert_eq!(log.next_sequence(), 1);

        log.append(movement(&log, MovementKind::Deposit, Decimal::ONE));
        assert_eq!(log.next_sequence(), 2);
        assert_eq!(log.entries()[0].sequence, 1);

        log.append(movement(&log, MovementKind::Deposit, Decimal::ONE));
        assert_eq!(log.entries()[1].sequence, 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_history_desc_orders_by_recency() {
        let mut log = MovementLog::new();
        let t0 = now();
        let t1 = t0 + chrono::Duration::seconds(1);

        log.append(movement_at(&log, MovementKind::Deposit, Decimal::ONE, t0));
        log.append(movement_at(&log, MovementKind::Deposit, Decimal::ONE, t1));

        let history = log.history_desc();
        assert_eq!(history[0].sequence, 2);
        assert_eq!(history[1].sequence, 1);
    }

    #[test]
    fn test_history_desc_breaks_timestamp_ties_by_sequence() {
        // Wall-clock resolution is not guaranteed; movements committed in
        // the same instant must still come back in a total order.
        let mut log = MovementLog::new();
        let t = now();
        for _ in 0..3 {
            log.append(movement_at(&log, MovementKind::Deposit, Decimal::ONE, t));
        }

        let history = log.history_desc();
        let sequences: Vec<u64> = history.iter().map(|m| m.sequence).collect();
        assert_eq!(sequences, vec![3, 2, 1]);
    }

    #[test]
    fn test_empty_log() {
        let log = MovementLog::new();
        assert!(log.is_empty());
        assert_eq!(log.net(), Decimal::ZERO);
        assert!(log.history_desc().is_empty());
    }

    proptest! {
        /// The bookkeeping identity: after any sequence of appends the net
        /// of the log equals the running balance, and sequences are exactly
        /// 1..=N with no gaps.
        #[test]
        fn prop_log_preserves_sums(ops in proptest::collection::vec((any::<bool>(), 1u32..10_000), 0..64)) {
            let mut log = MovementLog::new();
            let mut balance = Decimal::ZERO;

            for (is_deposit, cents) in ops {
                let kind = if is_deposit {
                    MovementKind::Deposit
                } else {
                    MovementKind::Withdraw
                };
                let amount = Decimal::new(i64::from(cents), 2);
                let entry = movement(&log, kind, amount);
                balance += entry.delta();
                log.append(entry);
            }

            prop_assert_eq!(log.net(), balance);
            for (i, entry) in log.entries().iter().enumerate() {
                prop_assert_eq!(entry.sequence, i as u64 + 1);
                prop_assert_eq!(entry.balance_after - entry.balance_before, entry.delta());
            }
        }
    }
}
