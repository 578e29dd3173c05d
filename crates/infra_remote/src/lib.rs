//! Remote Service Adapter
//!
//! HTTP implementations of the bill domain's gateway ports. The remote
//! service is the source of truth for committed items and fees; this
//! crate only moves bytes and translates failures - every consistency
//! rule lives in `domain_bill`.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_remote::RemoteBillService;
//! use domain_bill::BillSession;
//!
//! let gateway = Arc::new(RemoteBillService::from_env()?);
//! let session = BillSession::new(bill_id, title, date, gateway.clone(), gateway);
//! session.load().await?;
//! ```

pub mod client;
pub mod config;
pub mod dto;
pub mod error;

pub use client::RemoteBillService;
pub use config::RemoteConfig;
pub use error::RemoteError;
