//! Bill domain errors

use core_kernel::{GatewayError, Money, MoneyError};
use thiserror::Error;

/// Errors that can occur in the bill domain
///
/// None of these are fatal: every failure leaves local state as it was
/// before the failing call.
#[derive(Debug, Error)]
pub enum BillError {
    /// The remote round trip failed; local state is unchanged
    #[error("Gateway failure: {0}")]
    Gateway(#[from] GatewayError),

    /// A money operation failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Another mutation for the same entity is still awaiting its
    /// confirmation
    #[error("A mutation for {kind} {id} is already in flight")]
    MutationInFlight { kind: &'static str, id: String },

    /// The targeted entity is not present in the local ledger
    #[error("Unknown {kind}: {id}")]
    UnknownEntry { kind: &'static str, id: String },

    /// The cached total disagrees with a full re-sum (test-only check)
    #[error("Cached total {cached} disagrees with recomputed total {resummed}")]
    TotalDrift { cached: Money, resummed: Money },
}
