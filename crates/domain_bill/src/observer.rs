//! Total change notifications
//!
//! A parent view that lists many bills subscribes to each bill's total.
//! Subscriptions are held weakly: when the owning view is dropped, its
//! observer silently stops receiving callbacks instead of erroring.

use core_kernel::{BillId, Money};
use std::sync::{Arc, Weak};

/// Callback interface for bill total changes
///
/// Invoked synchronously after each confirmed mutation. Implementations
/// must not panic; they are called while no internal locks are held, so
/// reading back session state from inside the callback is allowed.
pub trait TotalObserver: Send + Sync {
    fn total_changed(&self, bill_id: BillId, new_total: Money);
}

/// The set of live subscriptions for one bill session
#[derive(Debug, Default)]
pub(crate) struct ObserverSet {
    observers: Vec<Weak<dyn TotalObserver>>,
}

impl ObserverSet {
    pub fn subscribe(&mut self, observer: Weak<dyn TotalObserver>) {
        self.observers.push(observer);
    }

    /// Clones the current subscriptions so callbacks can be invoked
    /// without holding the lock that guards this set
    pub fn snapshot(&self) -> Vec<Weak<dyn TotalObserver>> {
        self.observers.clone()
    }

    /// Drops subscriptions whose observers are gone
    pub fn prune(&mut self) {
        self.observers.retain(|weak| weak.strong_count() > 0);
    }
}

/// Helper to downgrade a concrete observer into the set's storage form
pub(crate) fn downgrade<O: TotalObserver + 'static>(observer: &Arc<O>) -> Weak<dyn TotalObserver> {
    let observer: Arc<dyn TotalObserver> = observer.clone();
    let weak: Weak<dyn TotalObserver> = Arc::downgrade(&observer);
    weak
}
