//! Common Test Fixtures
//!
//! Canonical values used across the test suite so individual tests only
//! spell out what they actually care about.

use chrono::NaiveDate;
use core_kernel::{BillId, FeeId, ItemId, Money};
use rust_decimal_macros::dec;

/// Standard monetary amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical item unit price (4.50)
    pub fn unit_price() -> Money {
        Money::from_decimal(dec!(4.50)).unwrap()
    }

    /// A typical flat fee (3.00)
    pub fn delivery_fee() -> Money {
        Money::from_decimal(dec!(3.00)).unwrap()
    }

    /// A pre-existing bill total (10.00)
    pub fn base_total() -> Money {
        Money::from_decimal(dec!(10.00)).unwrap()
    }

    /// An exact number of cents
    pub fn cents(cents: i64) -> Money {
        Money::from_cents(cents).unwrap()
    }
}

/// Fresh identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn bill_id() -> BillId {
        BillId::new_v7()
    }

    pub fn item_id() -> ItemId {
        ItemId::new_v7()
    }

    pub fn fee_id() -> FeeId {
        FeeId::new_v7()
    }
}

/// Standard display strings
pub struct StringFixtures;

impl StringFixtures {
    pub fn bill_title() -> &'static str {
        "Team dinner"
    }

    pub fn item_description() -> &'static str {
        "Pad Thai"
    }

    pub fn fee_description() -> &'static str {
        "Delivery"
    }
}

/// Standard dates
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn bill_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }
}
