//! Scriptable Mock Gateway
//!
//! An in-memory stand-in for the remote bill service. It owns the
//! committed entries, assigns ids on create, and can be scripted per
//! operation to fail (once per scripted error, in order) or to respond
//! with artificial latency. Use `#[tokio::test(start_paused = true)]`
//! to make latencies virtual.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use core_kernel::{BillId, DomainPort, FeeId, GatewayError, ItemId};
use domain_bill::{Fee, FeeDraft, FeeGateway, Item, ItemDraft, ItemGateway};

/// Operations the mock distinguishes for scripting and call logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    ListItems,
    CreateItem,
    UpdateItem,
    DeleteItem,
    ListFees,
    CreateFee,
    UpdateFee,
    DeleteFee,
}

/// In-memory mock implementation of both gateway ports
#[derive(Default)]
pub struct MockBillGateway {
    items: Mutex<Vec<Item>>,
    fees: Mutex<Vec<Fee>>,
    failures: Mutex<HashMap<GatewayOp, VecDeque<GatewayError>>>,
    latencies: Mutex<HashMap<GatewayOp, Duration>>,
    calls: Mutex<Vec<GatewayOp>>,
}

impl MockBillGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Inserts an item into the remote state, returning its canonical form
    pub fn seed_item(&self, item: Item) -> Item {
        self.items.lock().unwrap().push(item.clone());
        item
    }

    /// Inserts a fee into the remote state, returning its canonical form
    pub fn seed_fee(&self, fee: Fee) -> Fee {
        self.fees.lock().unwrap().push(fee.clone());
        fee
    }

    /// Scripts the next call to `op` to fail with `error`
    ///
    /// Multiple scripted errors for the same operation are consumed in
    /// order; once drained, calls succeed again.
    pub fn fail_next(&self, op: GatewayOp, error: GatewayError) {
        self.failures
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(error);
    }

    /// Adds artificial latency to every call to `op`
    pub fn set_latency(&self, op: GatewayOp, latency: Duration) {
        self.latencies.lock().unwrap().insert(op, latency);
    }

    /// The calls received so far, in arrival order
    pub fn calls(&self) -> Vec<GatewayOp> {
        self.calls.lock().unwrap().clone()
    }

    /// Snapshot of the committed items
    pub fn remote_items(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }

    /// Snapshot of the committed fees
    pub fn remote_fees(&self) -> Vec<Fee> {
        self.fees.lock().unwrap().clone()
    }

    async fn begin(&self, op: GatewayOp) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(op);
        let latency = self.latencies.lock().unwrap().get(&op).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let scripted = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&op)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl DomainPort for MockBillGateway {}

#[async_trait]
impl ItemGateway for MockBillGateway {
    async fn list(&self, _bill_id: BillId) -> Result<Vec<Item>, GatewayError> {
        self.begin(GatewayOp::ListItems).await?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, _bill_id: BillId, draft: ItemDraft) -> Result<Item, GatewayError> {
        self.begin(GatewayOp::CreateItem).await?;
        let item = Item::new(
            ItemId::new_v7(),
            draft.description,
            draft.unit_price,
            draft.quantity,
        );
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        _bill_id: BillId,
        id: ItemId,
        draft: ItemDraft,
    ) -> Result<Item, GatewayError> {
        self.begin(GatewayOp::UpdateItem).await?;
        let updated = Item::new(id, draft.description, draft.unit_price, draft.quantity);
        let mut items = self.items.lock().unwrap();
        if let Some(slot) = items.iter_mut().find(|i| i.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    async fn delete(&self, _bill_id: BillId, id: ItemId) -> Result<(), GatewayError> {
        self.begin(GatewayOp::DeleteItem).await?;
        self.items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait]
impl FeeGateway for MockBillGateway {
    async fn list(&self, _bill_id: BillId) -> Result<Vec<Fee>, GatewayError> {
        self.begin(GatewayOp::ListFees).await?;
        Ok(self.fees.lock().unwrap().clone())
    }

    async fn create(&self, _bill_id: BillId, draft: FeeDraft) -> Result<Fee, GatewayError> {
        self.begin(GatewayOp::CreateFee).await?;
        let fee = Fee::new(FeeId::new_v7(), draft.description, draft.price);
        self.fees.lock().unwrap().push(fee.clone());
        Ok(fee)
    }

    async fn update(
        &self,
        _bill_id: BillId,
        id: FeeId,
        draft: FeeDraft,
    ) -> Result<Fee, GatewayError> {
        self.begin(GatewayOp::UpdateFee).await?;
        let updated = Fee::new(id, draft.description, draft.price);
        let mut fees = self.fees.lock().unwrap();
        if let Some(slot) = fees.iter_mut().find(|f| f.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    async fn delete(&self, _bill_id: BillId, id: FeeId) -> Result<(), GatewayError> {
        self.begin(GatewayOp::DeleteFee).await?;
        self.fees.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }
}
