//! The bill aggregate
//!
//! A bill owns its two ledgers and the derived total. The total changes
//! only through the confirmation methods below, each of which computes
//! the new total first and commits the ledger mutation and the total
//! together, so no observer of the aggregate can see one without the
//! other.

use chrono::NaiveDate;
use core_kernel::{BillId, FeeId, ItemId, Money};

use crate::entry::{Fee, Item, LedgerEntry};
use crate::error::BillError;
use crate::ledger::Ledger;

/// A shared expense record: items, fees, and a derived total
///
/// # Invariants
///
/// - `total == items.contribution_sum() + fees.contribution_sum()` after
///   every completed mutation
/// - The total is updated by O(1) deltas; a full re-sum happens only on
///   load, reconciliation, and the test-only [`Bill::verify_total`]
#[derive(Debug, Clone)]
pub struct Bill {
    id: BillId,
    title: String,
    date: NaiveDate,
    items: Ledger<Item>,
    fees: Ledger<Fee>,
    total: Money,
}

impl Bill {
    /// Creates an empty bill
    pub fn new(id: BillId, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            items: Ledger::new(),
            fees: Ledger::new(),
            total: Money::ZERO,
        }
    }

    pub fn id(&self) -> BillId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn items(&self) -> &Ledger<Item> {
        &self.items
    }

    pub fn fees(&self) -> &Ledger<Fee> {
        &self.fees
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Recomputes the total from scratch
    ///
    /// Used for loading, reconciliation, and invariant checks; never on
    /// the per-mutation hot path.
    pub fn full_resum(&self) -> Result<Money, BillError> {
        let items = self.items.contribution_sum()?;
        let fees = self.fees.contribution_sum()?;
        Ok(items.checked_add(fees)?)
    }

    /// Checks that the cached total agrees with a full re-sum
    ///
    /// # Errors
    ///
    /// Returns [`BillError::TotalDrift`] if the two disagree. Used by
    /// tests; under exclusive per-entity access this never fires.
    pub fn verify_total(&self) -> Result<(), BillError> {
        let resummed = self.full_resum()?;
        if resummed != self.total {
            return Err(BillError::TotalDrift {
                cached: self.total,
                resummed,
            });
        }
        Ok(())
    }

    /// Replaces both ledgers with freshly fetched entries and re-derives
    /// the total
    pub(crate) fn load(&mut self, items: Vec<Item>, fees: Vec<Fee>) -> Result<Money, BillError> {
        let mut total = Money::ZERO;
        for item in &items {
            total = total.checked_add(item.contribution()?)?;
        }
        for fee in &fees {
            total = total.checked_add(fee.contribution()?)?;
        }

        self.items.load(items);
        self.fees.load(fees);
        self.total = total;
        Ok(total)
    }

    pub(crate) fn confirm_item_created(&mut self, item: Item) -> Result<Money, BillError> {
        confirm_created(&mut self.items, &mut self.total, item)
    }

    pub(crate) fn confirm_item_updated(
        &mut self,
        old_contribution: Money,
        item: Item,
    ) -> Result<Option<Money>, BillError> {
        confirm_replaced(&mut self.items, &mut self.total, old_contribution, item)
    }

    pub(crate) fn confirm_item_removed(
        &mut self,
        id: ItemId,
        old_contribution: Money,
    ) -> Result<Option<Money>, BillError> {
        confirm_removed(&mut self.items, &mut self.total, id, old_contribution)
    }

    pub(crate) fn confirm_fee_created(&mut self, fee: Fee) -> Result<Money, BillError> {
        confirm_created(&mut self.fees, &mut self.total, fee)
    }

    pub(crate) fn confirm_fee_updated(
        &mut self,
        old_contribution: Money,
        fee: Fee,
    ) -> Result<Option<Money>, BillError> {
        confirm_replaced(&mut self.fees, &mut self.total, old_contribution, fee)
    }

    pub(crate) fn confirm_fee_removed(
        &mut self,
        id: FeeId,
        old_contribution: Money,
    ) -> Result<Option<Money>, BillError> {
        confirm_removed(&mut self.fees, &mut self.total, id, old_contribution)
    }
}

// The confirmation helpers compute the new total before touching either
// the ledger or the cached total, so a failed money operation leaves the
// aggregate exactly as it was.

fn confirm_created<T: LedgerEntry>(
    ledger: &mut Ledger<T>,
    total: &mut Money,
    entry: T,
) -> Result<Money, BillError> {
    let new_total = total.checked_add(entry.contribution()?)?;
    ledger.append(entry);
    *total = new_total;
    Ok(new_total)
}

fn confirm_replaced<T: LedgerEntry>(
    ledger: &mut Ledger<T>,
    total: &mut Money,
    old_contribution: Money,
    entry: T,
) -> Result<Option<Money>, BillError> {
    let new_total = total
        .checked_sub(old_contribution)?
        .checked_add(entry.contribution()?)?;
    if !ledger.replace(entry) {
        return Ok(None);
    }
    *total = new_total;
    Ok(Some(new_total))
}

fn confirm_removed<T: LedgerEntry>(
    ledger: &mut Ledger<T>,
    total: &mut Money,
    id: T::Id,
    old_contribution: Money,
) -> Result<Option<Money>, BillError> {
    let new_total = total.checked_sub(old_contribution)?;
    if ledger.remove(id).is_none() {
        return Ok(None);
    }
    *total = new_total;
    Ok(Some(new_total))
}
