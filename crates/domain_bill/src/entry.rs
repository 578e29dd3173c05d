//! Bill line entries
//!
//! Two kinds of entry make up a bill: items (quantity-priced purchases)
//! and fees (flat surcharges). Both carry a server-assigned identifier;
//! the drafts below are what the client sends before an id exists.

use core_kernel::{CoreError, FeeId, ItemId, Money, MoneyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common behavior of entries held in a [`crate::ledger::Ledger`]
pub trait LedgerEntry {
    type Id: Copy + Eq + fmt::Display;

    /// Entity kind name used in logs
    const KIND: &'static str;

    /// The entry's identity
    fn id(&self) -> Self::Id;

    /// The entry's effect on the bill total
    fn contribution(&self) -> Result<Money, MoneyError>;
}

/// A purchased line entry: quantity times unit price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier assigned by the remote service
    pub id: ItemId,
    /// Display text
    pub description: String,
    /// Price per unit
    pub unit_price: Money,
    /// Number of units, at least one
    pub quantity: u32,
}

impl Item {
    /// Creates an item from fields confirmed by the remote service
    pub fn new(id: ItemId, description: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        Self {
            id,
            description: description.into(),
            unit_price,
            quantity,
        }
    }
}

impl LedgerEntry for Item {
    type Id = ItemId;

    const KIND: &'static str = "item";

    fn id(&self) -> ItemId {
        self.id
    }

    fn contribution(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }
}

/// A flat surcharge entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Identifier assigned by the remote service
    pub id: FeeId,
    /// Display text
    pub description: String,
    /// Flat price
    pub price: Money,
}

impl Fee {
    /// Creates a fee from fields confirmed by the remote service
    pub fn new(id: FeeId, description: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            description: description.into(),
            price,
        }
    }
}

impl LedgerEntry for Fee {
    type Id = FeeId;

    const KIND: &'static str = "fee";

    fn id(&self) -> FeeId {
        self.id
    }

    fn contribution(&self) -> Result<Money, MoneyError> {
        Ok(self.price)
    }
}

/// Client-side fields for creating or updating an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub description: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl ItemDraft {
    /// Creates a draft, requiring a positive quantity
    pub fn new(
        description: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Self, CoreError> {
        if quantity == 0 {
            return Err(CoreError::validation("Item quantity must be at least 1"));
        }
        Ok(Self {
            description: description.into(),
            unit_price,
            quantity,
        })
    }
}

/// Client-side fields for creating or updating a fee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDraft {
    pub description: String,
    pub price: Money,
}

impl FeeDraft {
    pub fn new(description: impl Into<String>, price: Money) -> Self {
        Self {
            description: description.into(),
            price,
        }
    }
}
