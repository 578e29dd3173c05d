//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults,
//! so tests spell out only the fields they care about.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{BillId, FeeId, ItemId, Money};
use domain_bill::{BillSession, Fee, Item};

use crate::fixtures::{IdFixtures, MoneyFixtures, StringFixtures, TemporalFixtures};
use crate::gateway::MockBillGateway;

/// Builder for test items
pub struct TestItemBuilder {
    id: ItemId,
    description: String,
    unit_price: Money,
    quantity: u32,
}

impl Default for TestItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestItemBuilder {
    pub fn new() -> Self {
        Self {
            id: IdFixtures::item_id(),
            description: StringFixtures::item_description().to_string(),
            unit_price: MoneyFixtures::unit_price(),
            quantity: 1,
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit_price(mut self, unit_price: Money) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn build(self) -> Item {
        Item::new(self.id, self.description, self.unit_price, self.quantity)
    }
}

/// Builder for test fees
pub struct TestFeeBuilder {
    id: FeeId,
    description: String,
    price: Money,
}

impl Default for TestFeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFeeBuilder {
    pub fn new() -> Self {
        Self {
            id: IdFixtures::fee_id(),
            description: StringFixtures::fee_description().to_string(),
            price: MoneyFixtures::delivery_fee(),
        }
    }

    pub fn with_id(mut self, id: FeeId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    pub fn build(self) -> Fee {
        Fee::new(self.id, self.description, self.price)
    }
}

/// Builder wiring a [`BillSession`] to a seeded [`MockBillGateway`]
///
/// The returned session has not called `load` yet; tests drive that
/// themselves so failure-during-load scenarios stay expressible.
pub struct TestSessionBuilder {
    bill_id: BillId,
    title: String,
    date: NaiveDate,
    items: Vec<Item>,
    fees: Vec<Fee>,
}

impl Default for TestSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSessionBuilder {
    pub fn new() -> Self {
        Self {
            bill_id: IdFixtures::bill_id(),
            title: StringFixtures::bill_title().to_string(),
            date: TemporalFixtures::bill_date(),
            items: Vec::new(),
            fees: Vec::new(),
        }
    }

    pub fn with_bill_id(mut self, bill_id: BillId) -> Self {
        self.bill_id = bill_id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_fee(mut self, fee: Fee) -> Self {
        self.fees.push(fee);
        self
    }

    pub fn build(self) -> (Arc<MockBillGateway>, BillSession) {
        let gateway = MockBillGateway::new();
        for item in self.items {
            gateway.seed_item(item);
        }
        for fee in self.fees {
            gateway.seed_fee(fee);
        }
        let session = BillSession::new(
            self.bill_id,
            self.title,
            self.date,
            gateway.clone(),
            gateway.clone(),
        );
        (gateway, session)
    }
}
