//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than standard assertions.

use core_kernel::Money;
use domain_bill::{BillSession, LedgerEntry};

/// Asserts that two Money values are exactly equal, reporting cents
pub fn assert_money_eq(actual: Money, expected: Money) {
    assert_eq!(
        actual, expected,
        "Money mismatch: actual={} ({} cents), expected={} ({} cents)",
        actual,
        actual.cents(),
        expected,
        expected.cents()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: Money) {
    assert!(money.is_zero(), "Expected zero money, got {money}");
}

/// Asserts that a session's cached total matches an independent re-sum
/// of its ledger snapshots
pub fn assert_total_consistent(session: &BillSession) {
    session
        .verify_total()
        .expect("cached total drifted from full re-sum");

    let mut expected = Money::ZERO;
    for item in session.items() {
        expected = expected
            .checked_add(item.contribution().expect("item contribution overflow"))
            .expect("total overflow");
    }
    for fee in session.fees() {
        expected = expected
            .checked_add(fee.contribution().expect("fee contribution overflow"))
            .expect("total overflow");
    }
    assert_money_eq(session.total(), expected);
}
