//! Shared Test Utilities
//!
//! Fixtures, builders, custom assertions, and a scriptable mock gateway
//! for exercising the bill-splitting crates without a live remote
//! service.

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod gateway;

pub use assertions::{assert_money_eq, assert_money_zero, assert_total_consistent};
pub use builders::{TestFeeBuilder, TestItemBuilder, TestSessionBuilder};
pub use fixtures::{IdFixtures, MoneyFixtures, StringFixtures, TemporalFixtures};
pub use gateway::{GatewayOp, MockBillGateway};

use once_cell::sync::Lazy;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Installs the test tracing subscriber once per process
///
/// Respects `RUST_LOG`; consistency warnings from the ledgers show up in
/// failing test output.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}
