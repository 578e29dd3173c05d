//! Synced mutations
//!
//! Every create, update, and delete of an item or fee is one unit of
//! work: send the request, await confirmation, then apply the ledger
//! mutation and the total delta together in one synchronous step. On
//! failure nothing is applied and the error is surfaced to the caller
//! without retrying.
//!
//! The total delta for updates and deletes is computed from the entity
//! state captured *before* the request is sent. Deltas therefore commute
//! across entities and responses may be applied in arrival order, except
//! for two mutations racing on the same entity id. That race is excluded
//! up front: a per-entity single-flight guard rejects the second mutation
//! while the first is awaiting its confirmation.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use core_kernel::{BillId, FeeId, ItemId, Money};

use crate::bill::Bill;
use crate::entry::{Fee, FeeDraft, Item, ItemDraft, LedgerEntry};
use crate::error::BillError;
use crate::observer::{downgrade, ObserverSet, TotalObserver};
use crate::ports::{FeeGateway, ItemGateway};

/// Key identifying the target of an in-flight mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MutationKey {
    Item(ItemId),
    Fee(FeeId),
}

impl MutationKey {
    fn kind(&self) -> &'static str {
        match self {
            MutationKey::Item(_) => Item::KIND,
            MutationKey::Fee(_) => Fee::KIND,
        }
    }

    fn entity_id(&self) -> String {
        match self {
            MutationKey::Item(id) => id.to_string(),
            MutationKey::Fee(id) => id.to_string(),
        }
    }
}

/// Locks a mutex, recovering the data on poisoning
///
/// Mutations are compute-then-commit: a panic can only happen before any
/// state is touched, so the data behind a poisoned lock is still
/// internally consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// RAII registration of a mutation key; the key is released when the
/// guard drops, including when the caller's future is dropped mid-flight.
struct FlightGuard<'a> {
    keys: &'a Mutex<HashSet<MutationKey>>,
    key: MutationKey,
}

impl<'a> FlightGuard<'a> {
    fn acquire(keys: &'a Mutex<HashSet<MutationKey>>, key: MutationKey) -> Result<Self, BillError> {
        if !lock(keys).insert(key) {
            return Err(BillError::MutationInFlight {
                kind: key.kind(),
                id: key.entity_id(),
            });
        }
        Ok(Self { keys, key })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.keys).remove(&self.key);
    }
}

/// One bill's live editing session
///
/// Owns the [`Bill`] aggregate and drives all remote round trips for it.
/// Internal state sits behind short-lived `std::sync::Mutex` sections
/// that are never held across an await, so mutations on distinct
/// entities may be in flight concurrently while each confirmation is
/// applied atomically.
pub struct BillSession {
    id: BillId,
    bill: Mutex<Bill>,
    items: Arc<dyn ItemGateway>,
    fees: Arc<dyn FeeGateway>,
    observers: Mutex<ObserverSet>,
    in_flight: Mutex<HashSet<MutationKey>>,
}

impl BillSession {
    /// Creates a session for a bill with empty ledgers
    ///
    /// Call [`BillSession::load`] to populate from the remote service.
    pub fn new(
        id: BillId,
        title: impl Into<String>,
        date: NaiveDate,
        items: Arc<dyn ItemGateway>,
        fees: Arc<dyn FeeGateway>,
    ) -> Self {
        Self {
            id,
            bill: Mutex::new(Bill::new(id, title, date)),
            items,
            fees,
            observers: Mutex::new(ObserverSet::default()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn bill_id(&self) -> BillId {
        self.id
    }

    /// The current derived total
    pub fn total(&self) -> Money {
        lock(&self.bill).total()
    }

    /// Snapshot of the item ledger in display order
    pub fn items(&self) -> Vec<Item> {
        lock(&self.bill).items().iter().cloned().collect()
    }

    /// Snapshot of the fee ledger in display order
    pub fn fees(&self) -> Vec<Fee> {
        lock(&self.bill).fees().iter().cloned().collect()
    }

    /// Checks the cached total against a full re-sum (test support)
    pub fn verify_total(&self) -> Result<(), BillError> {
        lock(&self.bill).verify_total()
    }

    /// Subscribes an observer to total changes
    ///
    /// The subscription is weak: dropping the observer ends it.
    pub fn subscribe<O: TotalObserver + 'static>(&self, observer: &Arc<O>) {
        lock(&self.observers).subscribe(downgrade(observer));
    }

    /// Fetches all items and fees and replaces local state wholesale
    ///
    /// The total is derived by full re-sum of the fetched entries.
    #[instrument(skip(self), fields(bill_id = %self.id))]
    pub async fn load(&self) -> Result<Money, BillError> {
        let (items, fees) = tokio::join!(self.items.list(self.id), self.fees.list(self.id));
        let (items, fees) = (items?, fees?);
        debug!(items = items.len(), fees = fees.len(), "loaded bill entries");

        let (previous, new_total) = {
            let mut bill = lock(&self.bill);
            let previous = bill.total();
            (previous, bill.load(items, fees)?)
        };
        if new_total != previous {
            self.notify(new_total);
        }
        Ok(new_total)
    }

    /// Re-fetches the authoritative entry lists and repairs any drift
    /// between the cached total and the re-summed one
    #[instrument(skip(self), fields(bill_id = %self.id))]
    pub async fn reconcile(&self) -> Result<Money, BillError> {
        let (items, fees) = tokio::join!(self.items.list(self.id), self.fees.list(self.id));
        let (items, fees) = (items?, fees?);

        let (cached, new_total) = {
            let mut bill = lock(&self.bill);
            let cached = bill.total();
            (cached, bill.load(items, fees)?)
        };
        if new_total != cached {
            warn!(
                cached = %cached,
                resummed = %new_total,
                "cached total diverged from authoritative re-sum; replaced"
            );
            self.notify(new_total);
        }
        Ok(new_total)
    }

    /// Creates an item on the remote service, then appends it locally
    #[instrument(skip(self, draft), fields(bill_id = %self.id))]
    pub async fn create_item(&self, draft: ItemDraft) -> Result<Item, BillError> {
        debug!("creating item");
        let created = self.items.create(self.id, draft).await?;
        let new_total = lock(&self.bill).confirm_item_created(created.clone())?;
        self.notify(new_total);
        Ok(created)
    }

    /// Replaces an item's fields on the remote service, then locally
    ///
    /// The old contribution is captured before the request is sent so a
    /// concurrent confirmation on another entity cannot skew the delta.
    #[instrument(skip(self, draft), fields(bill_id = %self.id, item_id = %id))]
    pub async fn update_item(&self, id: ItemId, draft: ItemDraft) -> Result<Item, BillError> {
        let _guard = FlightGuard::acquire(&self.in_flight, MutationKey::Item(id))?;
        let old_contribution = self.item_contribution(id)?;

        debug!("updating item");
        let updated = self.items.update(self.id, id, draft).await?;
        let outcome = lock(&self.bill).confirm_item_updated(old_contribution, updated.clone())?;
        if let Some(new_total) = outcome {
            self.notify(new_total);
        }
        Ok(updated)
    }

    /// Deletes an item on the remote service, then removes it locally
    #[instrument(skip(self), fields(bill_id = %self.id, item_id = %id))]
    pub async fn delete_item(&self, id: ItemId) -> Result<(), BillError> {
        let _guard = FlightGuard::acquire(&self.in_flight, MutationKey::Item(id))?;
        let old_contribution = self.item_contribution(id)?;

        debug!("deleting item");
        self.items.delete(self.id, id).await?;
        let outcome = lock(&self.bill).confirm_item_removed(id, old_contribution)?;
        if let Some(new_total) = outcome {
            self.notify(new_total);
        }
        Ok(())
    }

    /// Creates a fee on the remote service, then appends it locally
    #[instrument(skip(self, draft), fields(bill_id = %self.id))]
    pub async fn create_fee(&self, draft: FeeDraft) -> Result<Fee, BillError> {
        debug!("creating fee");
        let created = self.fees.create(self.id, draft).await?;
        let new_total = lock(&self.bill).confirm_fee_created(created.clone())?;
        self.notify(new_total);
        Ok(created)
    }

    /// Replaces a fee's fields on the remote service, then locally
    #[instrument(skip(self, draft), fields(bill_id = %self.id, fee_id = %id))]
    pub async fn update_fee(&self, id: FeeId, draft: FeeDraft) -> Result<Fee, BillError> {
        let _guard = FlightGuard::acquire(&self.in_flight, MutationKey::Fee(id))?;
        let old_contribution = self.fee_contribution(id)?;

        debug!("updating fee");
        let updated = self.fees.update(self.id, id, draft).await?;
        let outcome = lock(&self.bill).confirm_fee_updated(old_contribution, updated.clone())?;
        if let Some(new_total) = outcome {
            self.notify(new_total);
        }
        Ok(updated)
    }

    /// Deletes a fee on the remote service, then removes it locally
    #[instrument(skip(self), fields(bill_id = %self.id, fee_id = %id))]
    pub async fn delete_fee(&self, id: FeeId) -> Result<(), BillError> {
        let _guard = FlightGuard::acquire(&self.in_flight, MutationKey::Fee(id))?;
        let old_contribution = self.fee_contribution(id)?;

        debug!("deleting fee");
        self.fees.delete(self.id, id).await?;
        let outcome = lock(&self.bill).confirm_fee_removed(id, old_contribution)?;
        if let Some(new_total) = outcome {
            self.notify(new_total);
        }
        Ok(())
    }

    /// Captures an item's contribution from local state at call time
    fn item_contribution(&self, id: ItemId) -> Result<Money, BillError> {
        let bill = lock(&self.bill);
        let item = bill.items().get(id).ok_or_else(|| BillError::UnknownEntry {
            kind: Item::KIND,
            id: id.to_string(),
        })?;
        Ok(item.contribution()?)
    }

    /// Captures a fee's contribution from local state at call time
    fn fee_contribution(&self, id: FeeId) -> Result<Money, BillError> {
        let bill = lock(&self.bill);
        let fee = bill.fees().get(id).ok_or_else(|| BillError::UnknownEntry {
            kind: Fee::KIND,
            id: id.to_string(),
        })?;
        Ok(fee.contribution()?)
    }

    /// Notifies observers outside any internal lock, so a callback may
    /// read session state or subscribe without deadlocking
    fn notify(&self, new_total: Money) {
        let subscriptions = lock(&self.observers).snapshot();
        let mut any_dead = false;
        for weak in subscriptions {
            match weak.upgrade() {
                Some(observer) => observer.total_changed(self.id, new_total),
                None => any_dead = true,
            }
        }
        if any_dead {
            lock(&self.observers).prune();
        }
    }
}
