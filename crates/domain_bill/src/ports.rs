//! Bill domain ports
//!
//! The remote persistence service is the source of truth for committed
//! items and fees. These traits define the CRUD surface the domain needs
//! from it, one per entity kind, both scoped by bill id. Adapters live
//! elsewhere: `infra_remote` provides the HTTP implementation, test
//! utilities provide in-memory mocks.

use async_trait::async_trait;

use core_kernel::{BillId, DomainPort, FeeId, GatewayError, ItemId};

use crate::entry::{Fee, FeeDraft, Item, ItemDraft};

/// Remote CRUD operations for items, scoped to one bill
#[async_trait]
pub trait ItemGateway: DomainPort {
    /// Fetches all items on the bill
    async fn list(&self, bill_id: BillId) -> Result<Vec<Item>, GatewayError>;

    /// Creates an item; the service assigns the id and returns the
    /// canonical entity
    async fn create(&self, bill_id: BillId, draft: ItemDraft) -> Result<Item, GatewayError>;

    /// Replaces an item's fields; returns the canonical post-update entity
    async fn update(
        &self,
        bill_id: BillId,
        id: ItemId,
        draft: ItemDraft,
    ) -> Result<Item, GatewayError>;

    /// Deletes an item
    async fn delete(&self, bill_id: BillId, id: ItemId) -> Result<(), GatewayError>;
}

/// Remote CRUD operations for fees, scoped to one bill
#[async_trait]
pub trait FeeGateway: DomainPort {
    /// Fetches all fees on the bill
    async fn list(&self, bill_id: BillId) -> Result<Vec<Fee>, GatewayError>;

    /// Creates a fee; the service assigns the id and returns the
    /// canonical entity
    async fn create(&self, bill_id: BillId, draft: FeeDraft) -> Result<Fee, GatewayError>;

    /// Replaces a fee's fields; returns the canonical post-update entity
    async fn update(
        &self,
        bill_id: BillId,
        id: FeeId,
        draft: FeeDraft,
    ) -> Result<Fee, GatewayError>;

    /// Deletes a fee
    async fn delete(&self, bill_id: BillId, id: FeeId) -> Result<(), GatewayError>;
}
