//! Ordered entry collections
//!
//! A ledger holds the items or fees belonging to one bill. Entries are
//! unordered with respect to business meaning, but insertion order is
//! preserved for stable display.
//!
//! # Invariants
//!
//! - At most one entry per id
//! - Mutations targeting an absent id are warned no-ops: the local view
//!   has diverged from the remote service, which is non-fatal but worth
//!   surfacing in logs

use crate::entry::LedgerEntry;
use core_kernel::{Money, MoneyError};
use tracing::warn;

/// The ordered set of entries of one kind belonging to one bill
#[derive(Debug, Clone)]
pub struct Ledger<T> {
    entries: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Ledger<T> {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Replaces the full contents (initial fetch or reconciliation)
    ///
    /// Has no total side effect by itself; the caller derives the bill
    /// total from the loaded entries.
    pub fn load(&mut self, entries: Vec<T>) {
        self.entries = entries;
    }

    /// Adds an entry at the end
    pub fn append(&mut self, entry: T) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: LedgerEntry> Ledger<T> {
    /// Returns the entry with the given id, if present
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Replaces the entry matching `entry.id()` with `entry`
    ///
    /// Returns false (and logs a consistency warning) if no entry with
    /// that id is present.
    pub fn replace(&mut self, entry: T) -> bool {
        let id = entry.id();
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => {
                warn!(
                    kind = T::KIND,
                    %id,
                    "replace targeted an id not present locally; local view diverged from remote"
                );
                false
            }
        }
    }

    /// Removes and returns the entry with the given id
    ///
    /// Returns None (and logs a consistency warning) if no entry with
    /// that id is present.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        match self.entries.iter().position(|e| e.id() == id) {
            Some(index) => Some(self.entries.remove(index)),
            None => {
                warn!(
                    kind = T::KIND,
                    %id,
                    "remove targeted an id not present locally; local view diverged from remote"
                );
                None
            }
        }
    }

    /// Sums the contributions of all entries
    pub fn contribution_sum(&self) -> Result<Money, MoneyError> {
        self.entries.iter().try_fold(Money::ZERO, |acc, entry| {
            acc.checked_add(entry.contribution()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Fee, Item};
    use core_kernel::{FeeId, ItemId, Money};
    use rust_decimal_macros::dec;

    fn item(description: &str, price: rust_decimal::Decimal, quantity: u32) -> Item {
        Item::new(
            ItemId::new_v7(),
            description,
            Money::from_decimal(price).unwrap(),
            quantity,
        )
    }

    #[test]
    fn test_append_preserves_order() {
        let mut ledger = Ledger::new();
        ledger.append(item("first", dec!(1.00), 1));
        ledger.append(item("second", dec!(2.00), 1));
        ledger.append(item("third", dec!(3.00), 1));

        let descriptions: Vec<_> = ledger.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_replace_swaps_fields_in_place() {
        let mut ledger = Ledger::new();
        let original = item("soup", dec!(5.00), 1);
        let id = original.id;
        ledger.append(original);
        ledger.append(item("salad", dec!(4.00), 1));

        let replaced = ledger.replace(Item::new(id, "soup (large)", Money::from_decimal(dec!(6.50)).unwrap(), 1));

        assert!(replaced);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(id).unwrap().description, "soup (large)");
        // Position is stable
        assert_eq!(ledger.iter().next().unwrap().id, id);
    }

    #[test]
    fn test_replace_absent_id_is_noop() {
        let mut ledger = Ledger::new();
        ledger.append(item("soup", dec!(5.00), 1));
        let before: Vec<_> = ledger.iter().cloned().collect();

        let replaced = ledger.replace(item("ghost", dec!(1.00), 1));

        assert!(!replaced);
        assert_eq!(ledger.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_remove() {
        let mut ledger = Ledger::new();
        let fee = Fee::new(FeeId::new_v7(), "Tip", Money::from_decimal(dec!(2.00)).unwrap());
        let id = fee.id;
        ledger.append(fee);

        let removed = ledger.remove(id);
        assert!(removed.is_some());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut ledger: Ledger<Fee> = Ledger::new();
        ledger.append(Fee::new(FeeId::new_v7(), "Tip", Money::from_decimal(dec!(2.00)).unwrap()));

        let removed = ledger.remove(FeeId::new_v7());

        assert!(removed.is_none());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_contribution_sum() {
        let mut ledger = Ledger::new();
        ledger.append(item("a", dec!(4.50), 2));
        ledger.append(item("b", dec!(1.25), 4));

        let sum = ledger.contribution_sum().unwrap();
        assert_eq!(sum, Money::from_decimal(dec!(14.00)).unwrap());
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut ledger = Ledger::new();
        ledger.append(item("stale", dec!(9.99), 1));

        ledger.load(vec![item("fresh", dec!(1.00), 1), item("fresher", dec!(2.00), 1)]);

        assert_eq!(ledger.len(), 2);
        assert!(ledger.iter().all(|i| i.description != "stale"));
    }
}
