//! Core error types used across the system

use crate::money::MoneyError;
use crate::ports::GatewayError;
use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
