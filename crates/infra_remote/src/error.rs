//! Remote adapter errors
//!
//! Per-request failures are translated straight into
//! [`core_kernel::GatewayError`] where the operation context is known;
//! this module covers the failures that can occur while constructing the
//! adapter itself.

use thiserror::Error;

/// Errors raised while building a [`crate::RemoteBillService`]
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The configured base URL does not parse
    #[error("Invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// Environment configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
