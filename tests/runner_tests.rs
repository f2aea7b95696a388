//! End-to-end command runs: lookup, send, read, report.

use std::time::Duration;

use bqmba_rs::mba::{MbaDeviceHandle, MbaTiming, MockSmbusPort};
use bqmba_rs::{run_command, MbaError, TransportError};

const ADDR: u8 = 0x0B;

fn handle(mock: &MockSmbusPort) -> MbaDeviceHandle<MockSmbusPort, Vec<String>> {
    let timing = MbaTiming {
        settle_delay: Duration::ZERO,
        post_command_delay: Duration::ZERO,
        read_timeout: Duration::from_millis(50),
        poll_interval: Duration::from_millis(1),
    };
    MbaDeviceHandle::with_sink(mock.clone(), Vec::new(), timing)
}

/// Tests a status read rendered down to its bit fields.
#[tokio::test]
async fn test_run_operation_status() {
    let mock = MockSmbusPort::new();
    // OperationStatus = 0x00021000: PF (12) and LED (17)
    mock.queue_block_reply(0x0054, &[0x00, 0x10, 0x02, 0x00]);
    let mut battery = handle(&mock);

    run_command(&mut battery, ADDR, "OperationStatus").await.unwrap();

    let lines = battery.sink();
    assert_eq!(lines[0], "Starting command OperationStatus : CMD=0x44, SUBCMD=0x0054");
    assert_eq!(lines[1], "Response length: 6 bytes");
    assert_eq!(lines[2], "Data (hex): 0x54 0x00 0x00 0x10 0x02 0x00");
    assert_eq!(
        lines[3],
        "Data (bin): 01010100 00000000 00000000 00010000 00000010 00000000"
    );
    assert_eq!(lines[4], "Bit 0 (PRES): 0 = Inactive - System Present (low)");
    assert_eq!(lines[4 + 12], "Bit 12 (PF): 1 = Active - Permanent Failure mode");
    assert_eq!(lines[4 + 17], "Bit 17 (LED): 1 = On - LED Display status");
    assert_eq!(lines.len(), 4 + 32 + 1);
    assert_eq!(lines.last().unwrap(), "");

    assert_eq!(
        mock.tx_frames(),
        vec![vec![0x44, 0x02, 0x54, 0x00], vec![0x44]]
    );
}

/// Tests a read command without bit fields.
#[tokio::test]
async fn test_run_device_type() {
    let mock = MockSmbusPort::new();
    mock.queue_block_reply(0x0001, &[0x50, 0x45]);
    let mut battery = handle(&mock);

    battery.run(ADDR, "DeviceType").await.unwrap();
    assert_eq!(
        battery.sink().as_slice(),
        &[
            "Starting command DeviceType : CMD=0x44, SUBCMD=0x0001",
            "Response length: 4 bytes",
            "Data (hex): 0x01 0x00 0x50 0x45",
            "",
        ]
    );
}

/// Tests that write commands are sent once and never read back.
#[tokio::test]
async fn test_run_write_command() {
    let mock = MockSmbusPort::new();
    let mut battery = handle(&mock);

    battery.run(ADDR, "ClearPF2").await.unwrap();

    assert_eq!(
        mock.tx_frames(),
        vec![vec![0x44, 0x06, 0x62, 0x40, 0x01, 0x23, 0x45, 0x67]]
    );
    assert!(mock.request_sizes().is_empty());
    assert_eq!(
        battery.sink().as_slice(),
        &["Starting command ClearPF2 : CMD=0x44, SUBCMD=0x4062 DATA=0x01234567", ""]
    );
}

/// Tests the failed-send report.
#[tokio::test]
async fn test_run_send_failure() {
    let mock = MockSmbusPort::new();
    mock.queue_status(2);
    let mut battery = handle(&mock);

    let err = battery.run(ADDR, "SafetyAlert").await.unwrap_err();
    assert!(matches!(err, MbaError::Transport(TransportError::AddressNack)));
    assert_eq!(
        &battery.sink()[1..],
        &[
            "Error: Received NACK on transmit of address.",
            "Failed to send command.",
            "",
        ]
    );
    assert!(mock.request_sizes().is_empty());
}

/// Tests the failed-read report.
#[tokio::test]
async fn test_run_read_failure() {
    let mock = MockSmbusPort::new();
    let mut battery = handle(&mock);

    let err = battery.run(ADDR, "PFStatus").await.unwrap_err();
    assert!(matches!(err, MbaError::ShortResponse { available: 0 }));
    assert_eq!(
        &battery.sink()[1..],
        &["No data available to read", "Failed to read command response", ""]
    );
}

/// Tests that an unknown name never touches the bus.
#[tokio::test]
async fn test_run_unknown_command() {
    let mock = MockSmbusPort::new();
    let mut battery = handle(&mock);

    let err = battery.run(ADDR, "").await.unwrap_err();
    assert!(matches!(err, MbaError::UnknownCommand(_)));
    assert!(mock.transmissions().is_empty());
    assert_eq!(battery.sink().as_slice(), &["Command not found: ", ""]);
}

/// Tests that a failed command leaves the handle usable for the next one.
#[tokio::test]
async fn test_failure_does_not_leak_into_next_command() {
    let mock = MockSmbusPort::new();
    mock.queue_reply(&[0x10, 0x52, 0x00]);
    mock.queue_block_reply(0x0002, &[0x07]);
    let mut battery = handle(&mock);

    assert!(matches!(
        battery.run(ADDR, "PFAlert").await,
        Err(MbaError::ReadTimeout { available: 2 })
    ));
    battery.sink_mut().clear();

    battery.run(ADDR, "FirmwareVersion").await.unwrap();
    assert_eq!(battery.sink()[2], "Data (hex): 0x02 0x00 0x07");
}
