//! Unit tests for `TransportError` and `MbaError` and their `Display` output.

use bqmba_rs::error::{MbaError, TransportError};

/// Tests that completion codes 1-5 map to their exact messages.
#[test]
fn test_completion_code_messages() {
    let expected = [
        (1, "Error: Data too long to fit in transmit buffer."),
        (2, "Error: Received NACK on transmit of address."),
        (3, "Error: Received NACK on transmit of data."),
        (4, "Error: Other error occurred."),
        (5, "Error: Timeout occurred."),
    ];
    for (code, message) in expected {
        let err = TransportError::from_code(code).unwrap();
        assert_eq!(err.to_string(), message);
        assert_eq!(err.code(), code);
    }
}

/// Tests that success is never classified.
#[test]
fn test_success_is_not_an_error() {
    assert_eq!(TransportError::from_code(0), None);
    assert!(TransportError::check(0).is_ok());
}

/// Tests that any other code is unknown.
#[test]
fn test_unknown_codes() {
    for code in [6u8, 42, 255] {
        let err = TransportError::check(code).unwrap_err();
        assert_eq!(err, TransportError::Unknown(code));
        assert_eq!(err.to_string(), "Error: Unknown error code.");
        assert_eq!(err.code(), code);
    }
}

/// Tests that transport errors pass through `MbaError` unchanged.
#[test]
fn test_transport_is_transparent() {
    let err: MbaError = TransportError::Timeout.into();
    assert_eq!(err.to_string(), "Error: Timeout occurred.");
}

/// Tests the read and lookup failure messages.
#[test]
fn test_mba_error_messages() {
    assert_eq!(
        MbaError::UnknownCommand("Foo".into()).to_string(),
        "Command not found: Foo"
    );
    assert_eq!(
        MbaError::ReadTimeout { available: 7 }.to_string(),
        "Timeout waiting for full data block, only 7 bytes readable."
    );
    assert!(MbaError::ShortResponse { available: 1 }
        .to_string()
        .starts_with("No data available to read"));
}

/// Tests that JSON errors become configuration errors.
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
    assert!(matches!(MbaError::from(json_err), MbaError::Config(_)));
}
