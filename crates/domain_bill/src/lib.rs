//! Bill Domain - Synced Total Reconciliation
//!
//! This crate keeps a bill's derived total consistent with its item and
//! fee ledgers while every edit round-trips through a remote CRUD
//! service.
//!
//! # Reconciliation Rules
//!
//! - An entry exists locally only after the remote service confirmed it
//! - Each confirmed mutation applies its ledger change and its O(1)
//!   total delta together, atomically
//! - Deltas are computed from entity state captured when the request was
//!   sent, so confirmations commute across entities regardless of
//!   arrival order
//! - Concurrent mutations on the *same* entity are rejected up front by
//!   a per-entity single-flight guard
//! - A failed round trip leaves local state untouched
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_bill::{BillSession, ItemDraft};
//!
//! let session = BillSession::new(bill_id, "Dinner", date, items_gw, fees_gw);
//! session.load().await?;
//!
//! let draft = ItemDraft::new("Pad Thai", unit_price, 2)?;
//! let item = session.create_item(draft).await?;
//! assert_eq!(session.total(), expected);
//! ```

pub mod bill;
pub mod entry;
pub mod error;
pub mod ledger;
pub mod observer;
pub mod ports;
pub mod sync;

pub use bill::Bill;
pub use entry::{Fee, FeeDraft, Item, ItemDraft, LedgerEntry};
pub use error::BillError;
pub use ledger::Ledger;
pub use observer::TotalObserver;
pub use ports::{FeeGateway, ItemGateway};
pub use sync::BillSession;
