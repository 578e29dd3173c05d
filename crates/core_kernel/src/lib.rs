//! Core Kernel - Foundational types for the bill-splitting system
//!
//! This crate provides the fundamental building blocks used across all
//! domain modules:
//! - Money with exact integer-cent arithmetic
//! - Strongly-typed entity identifiers
//! - Gateway port abstractions shared by remote adapters

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;

pub use error::CoreError;
pub use identifiers::{BillId, FeeId, ItemId};
pub use money::{Money, MoneyError};
pub use ports::{DomainPort, GatewayError};
