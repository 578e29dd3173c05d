//! Gateway port infrastructure
//!
//! Each domain defines port traits for the remote systems it talks to;
//! adapters (HTTP client, in-memory mock) implement those traits. This
//! module provides the error type shared by every port implementation.

use std::fmt;
use thiserror::Error;

/// Error type for gateway operations
///
/// A gateway failure is an opaque transport-level signal: callers can
/// distinguish failure from success, and may inspect transience, but no
/// domain semantics ride on the specific variant.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not reach the remote service
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// The remote service answered with a non-success status
    #[error("Remote service returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// The response body could not be decoded into the expected shape
    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl GatewayError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        GatewayError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Status error
    pub fn status(code: u16, message: impl fmt::Display) -> Self {
        GatewayError::Status {
            code,
            message: message.to_string(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        GatewayError::Decode {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a transient failure that may
    /// succeed on retry
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Connection { .. } | GatewayError::Timeout { .. } => true,
            GatewayError::Status { code, .. } => *code == 429 || *code >= 500,
            GatewayError::Decode { .. } => false,
        }
    }
}

/// Marker trait for gateway adapters
///
/// All port traits extend this marker to ensure implementations are
/// thread-safe and usable from async contexts.
pub trait DomainPort: Send + Sync + 'static {}
