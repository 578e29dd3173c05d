//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;
use core_kernel::ports::GatewayError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::Overflow;
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(_)));
    assert!(core_error.to_string().contains("Overflow"));
}

#[test]
fn test_core_error_from_gateway_error() {
    let gateway_error = GatewayError::connection("refused");
    let core_error: CoreError = gateway_error.into();

    assert!(matches!(core_error, CoreError::Gateway(_)));
}

#[test]
fn test_gateway_error_is_opaque_but_distinguishable() {
    // Callers can tell failure from success and inspect transience,
    // nothing more rides on the variant
    let errors = vec![
        GatewayError::connection("refused"),
        GatewayError::Timeout {
            operation: "create_item".to_string(),
            duration_ms: 10_000,
        },
        GatewayError::status(502, "bad gateway"),
        GatewayError::decode("unexpected body"),
    ];

    for error in &errors {
        assert!(!error.to_string().is_empty());
    }

    assert!(errors[0].is_transient());
    assert!(errors[1].is_transient());
    assert!(errors[2].is_transient());
    assert!(!errors[3].is_transient());
}

#[test]
fn test_gateway_error_preserves_source() {
    use std::error::Error;

    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
    let error = GatewayError::Connection {
        message: "request failed".to_string(),
        source: Some(Box::new(io)),
    };

    assert!(error.source().is_some());
}
